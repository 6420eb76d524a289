use serde::Serialize;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Closed set of tags carried by every per-file failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    NotFound,
    UnsupportedFormat,
    ExtractionFailure,
    /// The detector panicked; not a `DetectionError` but still isolated per file.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "NotFound",
            Self::UnsupportedFormat => "UnsupportedFormat",
            Self::ExtractionFailure => "ExtractionFailure",
            Self::Internal => "Internal",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("unsupported file format: {} (only PDF and DOCX are supported)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to extract text from {}", .path.display())]
    ExtractionFailure {
        path: PathBuf,
        #[source]
        source: ExtractionError,
    },
}

impl DetectionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            Self::ExtractionFailure { .. } => ErrorKind::ExtractionFailure,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::UnsupportedFormat { path }
            | Self::ExtractionFailure { path, .. } => path,
        }
    }
}

/// Errors raised by a `TextExtractor` while reading a container.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid docx archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("invalid docx xml: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("invalid pdf: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("cannot read text of page {page}: {source}")]
    Page {
        page: u32,
        #[source]
        source: lopdf::Error,
    },

    #[error("archive part `{0}` is missing")]
    MissingPart(String),

    #[error("{0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to create output directory {}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize detection results: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to move results into place at {}", .path.display())]
    Rename {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("max_workers must be at least 1")]
    NoWorkers,

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

#[derive(Debug, Error)]
pub enum HookError {
    #[error("failed to run `git {step}`: {source}")]
    Spawn {
        step: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("`git {step}` exited with {status}: {stderr}")]
    Failed {
        step: &'static str,
        status: ExitStatus,
        stderr: String,
    },
}
