// Snapshot file transfer.
// Reads and writes raw JSON bytes; parsing belongs to the collection serializer.

use std::fs;
use std::path::Path;

use crate::types::errors::SnapshotError;

/// Trait defining the file transfer collaborator.
pub trait FileTransfer {
    fn read_json_file(&self, path: &Path) -> Result<Vec<u8>, SnapshotError>;
    fn write_json_file(&self, path: &Path, bytes: &[u8]) -> Result<(), SnapshotError>;
}

/// File transfer on the local file system.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileTransfer;

impl FileTransfer for LocalFileTransfer {
    fn read_json_file(&self, path: &Path) -> Result<Vec<u8>, SnapshotError> {
        fs::read(path).map_err(|e| {
            SnapshotError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })
    }

    /// Writes the file, creating parent directories if they don't exist.
    fn write_json_file(&self, path: &Path, bytes: &[u8]) -> Result<(), SnapshotError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                SnapshotError::IoError(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }
        fs::write(path, bytes).map_err(|e| {
            SnapshotError::IoError(format!("Failed to write {}: {}", path.display(), e))
        })
    }
}
