use crate::error::PersistenceError;
use crate::DetectionResult;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Durable store for the successes of one batch.
pub trait ResultSink {
    fn persist(&self, results: &[DetectionResult]) -> Result<(), PersistenceError>;

    /// Where the results end up; handed to the post-batch hook.
    fn location(&self) -> &Path;
}

/// Writes the result set as one pretty-printed JSON array.
///
/// The array is written to `<output>.tmp` first and renamed over the target,
/// so readers see either the previous file or the complete new one.
#[derive(Debug, Clone)]
pub struct JsonFileSink {
    path: PathBuf,
}

impl JsonFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ResultSink for JsonFileSink {
    fn persist(&self, results: &[DetectionResult]) -> Result<(), PersistenceError> {
        // Ensure the output directory exists
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| PersistenceError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        // Serialize with 4-space indentation
        let mut buf = Vec::new();
        let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        results.serialize(&mut ser)?;
        buf.push(b'\n');

        // Write and flush the temp file, then swap it in
        let tmp = self.tmp_path();
        write_synced(&tmp, &buf).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            PersistenceError::Write {
                path: tmp.clone(),
                source,
            }
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| {
            let _ = fs::remove_file(&tmp);
            PersistenceError::Rename {
                path: self.path.clone(),
                source,
            }
        })?;

        log::info!(
            "TOC detection results saved to {} ({} documents)",
            self.path.display(),
            results.len()
        );
        Ok(())
    }

    fn location(&self) -> &Path {
        &self.path
    }
}

/// Contents must reach the disk before the rename makes them visible.
fn write_synced(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}
