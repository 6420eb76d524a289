use memmap2::Mmap;
use std::fs::File;
use std::io;
use std::path::Path;

/// Read-only, memory-mapped view of an input document.
///
/// Zero-length files are not mapped; `as_slice` returns an empty slice for them.
pub struct MappedFile {
    mmap: Option<Mmap>,
}

impl MappedFile {
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = File::open(path)?;
        if file.metadata()?.len() == 0 {
            return Ok(Self { mmap: None });
        }
        // SAFETY: the map is read-only and dropped before the detector returns;
        // inputs are not expected to be truncated while a batch is running.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { mmap: Some(mmap) })
    }

    pub fn as_slice(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }
}
