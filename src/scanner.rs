use std::fs;
use std::io;
use std::path::Path;

use crate::error::ScanError;
use crate::types::{FileEntry, SizeRange};

#[derive(Debug, Default)]
pub struct ScanResult {
    pub entries: Vec<FileEntry>,
    pub range: SizeRange,
}

/// Enumerates the immediate regular files of `dir` and computes the size
/// extrema in the same pass. Directories and symlinks are skipped and never
/// affect the size statistics; sizes come from the directory iteration
/// itself, so no file is stat'ed again afterwards.
pub fn scan(dir: &Path) -> Result<ScanResult, ScanError> {
    let metadata = fs::metadata(dir).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ScanError::NotFound(dir.to_path_buf()),
        _ => ScanError::Io(e),
    })?;

    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(dir.to_path_buf()));
    }

    let mut result = ScanResult::default();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }

        let size = entry.metadata()?.len();
        result.range.observe(size);
        result.entries.push(FileEntry {
            path: entry.path(),
            size,
        });
    }

    Ok(result)
}
