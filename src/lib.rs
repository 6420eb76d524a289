pub mod core {
    pub mod batch;
    pub mod detector;
    pub mod docx_extractor;
    pub mod extractor;
    pub mod pattern;
    pub mod pdf_extractor;
    pub mod sink;
}

pub mod utils {
    pub mod document_processor;
    pub mod events;
    pub mod git_hook;
    pub mod mapped_file;
}

pub mod config;
pub mod error;

#[cfg(test)]
pub(crate) mod testing;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

pub use error::{DetectionError, ErrorKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentFormat {
    #[serde(rename = "PDF")]
    Pdf,
    #[serde(rename = "DOCX")]
    Docx,
}

impl DocumentFormat {
    /// Resolve the format from the path's extension, case-insensitively.
    /// Does not touch the filesystem.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "DOCX",
        }
    }

    /// What one text unit of this format is called in log lines.
    pub fn unit_name(&self) -> &'static str {
        match self {
            Self::Pdf => "page",
            Self::Docx => "paragraph",
        }
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One page (PDF) or paragraph (DOCX) of extracted text. `index` is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextUnit {
    pub index: usize,
    pub text: String,
}

impl TextUnit {
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }
}

/// A single matched heading, already normalized by the pattern matcher.
pub type TocEntry = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub source_path: String,
    pub format: DocumentFormat,
    pub entries: Vec<TocEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionFailure {
    pub source_path: String,
    pub error_kind: ErrorKind,
    pub message: String,
}

impl DetectionFailure {
    pub fn from_error(err: &DetectionError) -> Self {
        use std::error::Error as _;

        let message = match err.source() {
            Some(cause) => format!("{err}: {cause}"),
            None => err.to_string(),
        };
        Self {
            source_path: err.path().to_string_lossy().into_owned(),
            error_kind: err.kind(),
            message,
        }
    }

    /// Failure for a defect that escaped the detector (a panic in a worker).
    pub fn internal(path: &Path, message: impl Into<String>) -> Self {
        Self {
            source_path: path.to_string_lossy().into_owned(),
            error_kind: ErrorKind::Internal,
            message: message.into(),
        }
    }
}
