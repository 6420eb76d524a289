use crate::core::extractor::TextExtractor;
use crate::core::pattern::PatternMatcher;
use crate::error::DetectionError;
use crate::utils::events::{DetectionEvent, EventSink};
use crate::{DetectionResult, DocumentFormat, TextUnit, TocEntry};
use std::path::Path;
use std::sync::Arc;

/// Runs TOC detection for one document: validation, format dispatch,
/// extraction and pattern matching.
pub struct DocumentDetector<X> {
    extractor: X,
    matcher: PatternMatcher,
    events: Arc<dyn EventSink>,
}

impl<X: TextExtractor> DocumentDetector<X> {
    pub fn new(extractor: X, events: Arc<dyn EventSink>) -> Self {
        Self {
            extractor,
            matcher: PatternMatcher::new(),
            events,
        }
    }

    pub fn events(&self) -> &Arc<dyn EventSink> {
        &self.events
    }

    /// Detect the TOC entries of `path`.
    ///
    /// The extension is checked first, then existence; the extractor is only
    /// called once both pass. Extractor errors come back as
    /// [`DetectionError::ExtractionFailure`] with the original error as source.
    pub fn detect(&self, path: &Path) -> Result<DetectionResult, DetectionError> {
        // Validate the path before any extraction
        let format = DocumentFormat::from_path(path).ok_or_else(|| {
            DetectionError::UnsupportedFormat {
                path: path.to_path_buf(),
            }
        })?;
        if !path.is_file() {
            return Err(DetectionError::NotFound {
                path: path.to_path_buf(),
            });
        }

        self.events.emit(&DetectionEvent::DetectionStarted { path });

        // Extract text units
        let units = self
            .extractor
            .extract(path, format)
            .map_err(|source| DetectionError::ExtractionFailure {
                path: path.to_path_buf(),
                source,
            })?;

        // Match headings per unit
        let entries = match format {
            DocumentFormat::Pdf => self.match_pages(path, &units),
            DocumentFormat::Docx => self.match_paragraphs(&units),
        };

        Ok(DetectionResult {
            source_path: path.to_string_lossy().into_owned(),
            format,
            entries,
        })
    }

    /// Pages without text are skipped and reported as a warning.
    fn match_pages(&self, path: &Path, units: &[TextUnit]) -> Vec<TocEntry> {
        let mut entries = Vec::new();
        for unit in units {
            if unit.text.trim().is_empty() {
                self.events.emit(&DetectionEvent::EmptyUnit {
                    path,
                    format: DocumentFormat::Pdf,
                    index: unit.index,
                });
                continue;
            }
            entries.extend(self.matcher.matches(&unit.text));
        }
        entries
    }

    fn match_paragraphs(&self, units: &[TextUnit]) -> Vec<TocEntry> {
        units
            .iter()
            .flat_map(|unit| self.matcher.matches(&unit.text))
            .collect()
    }
}
