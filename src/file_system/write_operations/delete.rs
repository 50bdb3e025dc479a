//! Delete implementation. Idempotent: a path that is already gone counts as
//! deleted.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::EngineError;

/// Deletes one item: directories recursively, files directly. A missing path
/// is success, not failure.
pub(super) fn delete_item(path: &Path) -> Result<(), EngineError> {
    match fs::symlink_metadata(path) {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(EngineError::io(path, e)),
        Ok(metadata) if metadata.is_dir() => {
            fs::remove_dir_all(path).map_err(|e| EngineError::io(path, e))
        }
        Ok(_) => fs::remove_file(path).map_err(|e| EngineError::io(path, e)),
    }
}
