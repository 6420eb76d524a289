//! Detection events and the sinks that receive them.
//!
//! The detector and the batch processor never log directly; they emit
//! [`DetectionEvent`]s into an injected [`EventSink`]. Binaries plug in
//! [`LogEventSink`], tests plug in [`RecordingEventSink`].

use crate::core::batch::BatchSummary;
use crate::{DetectionFailure, DetectionResult, DocumentFormat};
use log::Level;
use std::fmt;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

#[derive(Debug)]
pub enum DetectionEvent<'a> {
    BatchStarted { files: usize, max_workers: usize },
    DetectionStarted { path: &'a Path },
    /// A page produced no text and was skipped.
    EmptyUnit {
        path: &'a Path,
        format: DocumentFormat,
        index: usize,
    },
    FileSucceeded { result: &'a DetectionResult },
    FileFailed { failure: &'a DetectionFailure },
    BatchFinished { summary: &'a BatchSummary },
}

impl DetectionEvent<'_> {
    pub fn level(&self) -> Level {
        match self {
            Self::DetectionStarted { .. } => Level::Debug,
            Self::EmptyUnit { .. } => Level::Warn,
            Self::FileFailed { .. } => Level::Error,
            Self::BatchStarted { .. } | Self::FileSucceeded { .. } | Self::BatchFinished { .. } => {
                Level::Info
            }
        }
    }
}

impl fmt::Display for DetectionEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BatchStarted { files, max_workers } => write!(
                f,
                "Starting TOC detection for {files} files with {max_workers} workers"
            ),
            Self::DetectionStarted { path } => {
                write!(f, "Starting TOC detection for file: {}", path.display())
            }
            Self::EmptyUnit { path, format, index } => write!(
                f,
                "No text found on {} {index} of {}",
                format.unit_name(),
                path.display()
            ),
            Self::FileSucceeded { result } => write!(
                f,
                "Successfully processed {} ({} entries)",
                result.source_path,
                result.entries.len()
            ),
            Self::FileFailed { failure } => write!(
                f,
                "Error processing {} [{}]: {}",
                failure.source_path, failure.error_kind, failure.message
            ),
            Self::BatchFinished { summary } => write!(
                f,
                "Batch finished: {} succeeded, {} failed out of {} in {:.2?}",
                summary.succeeded, summary.failed, summary.total, summary.elapsed
            ),
        }
    }
}

pub trait EventSink: Send + Sync {
    fn emit(&self, event: &DetectionEvent<'_>);
}

/// Forwards events to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&self, event: &DetectionEvent<'_>) {
        log::log!(event.level(), "{}", event);
    }
}

/// Keeps every rendered event in memory.
#[derive(Debug, Default)]
pub struct RecordingEventSink {
    records: Mutex<Vec<(Level, String)>>,
}

impl RecordingEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn at_level(&self, level: Level) -> Vec<String> {
        self.records()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, message)| message)
            .collect()
    }
}

impl EventSink for RecordingEventSink {
    fn emit(&self, event: &DetectionEvent<'_>) {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((event.level(), event.to_string()));
    }
}

/// Install `env_logger` with an `info` default, optionally writing to a file
/// instead of stderr. Only binaries call this.
pub fn init_logging(log_file: Option<&Path>) -> anyhow::Result<()> {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));

    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::options().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}
