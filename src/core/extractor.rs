use crate::core::docx_extractor::DocxExtractor;
use crate::core::pdf_extractor::PdfExtractor;
use crate::error::ExtractionError;
use crate::{DocumentFormat, TextUnit};
use std::path::Path;

/// Turns a document into its ordered text units: one per page for PDF,
/// one per paragraph for DOCX.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path, format: DocumentFormat) -> Result<Vec<TextUnit>, ExtractionError>;
}

/// Extractor that handles every supported format
#[derive(Debug, Default, Clone)]
pub struct UniversalExtractor {
    pub docx: DocxExtractor,
    pub pdf: PdfExtractor,
}

impl UniversalExtractor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TextExtractor for UniversalExtractor {
    fn extract(&self, path: &Path, format: DocumentFormat) -> Result<Vec<TextUnit>, ExtractionError> {
        match format {
            DocumentFormat::Docx => self.docx.extract(path),
            DocumentFormat::Pdf => self.pdf.extract(path),
        }
    }
}

impl<T: TextExtractor + ?Sized> TextExtractor for std::sync::Arc<T> {
    fn extract(&self, path: &Path, format: DocumentFormat) -> Result<Vec<TextUnit>, ExtractionError> {
        (**self).extract(path, format)
    }
}
