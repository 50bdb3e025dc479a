//! Move and rename implementation.
//!
//! Moving a directory onto an existing directory is a hard conflict
//! (`TargetExists`), never a merge or an overwrite. Moving a file overwrites
//! an existing destination file. Cross-filesystem moves fall back to
//! copy-then-delete.

use std::fs;
use std::io;
use std::path::Path;

use super::copy::copy_dir_recursive;
use crate::error::EngineError;

/// Moves one source item into the target directory.
pub(super) fn move_item(source: &Path, target_dir: &Path) -> Result<(), EngineError> {
    let Some(file_name) = source.file_name() else {
        return Err(EngineError::InvalidArgument {
            message: format!("Invalid source path: {}", source.display()),
        });
    };
    let dest = target_dir.join(file_name);

    if source.is_dir() {
        if dest.is_dir() {
            // Explicit conflict instead of silent data loss or merge.
            return Err(EngineError::TargetExists {
                path: dest.display().to_string(),
            });
        }
    } else if dest.is_file() {
        // File move overwrites; remove first so rename succeeds everywhere.
        fs::remove_file(&dest).map_err(|e| EngineError::io(&dest, e))?;
    }

    rename_or_copy(source, &dest)
}

/// Renames an entry in place, keeping it in the same parent directory.
/// Single-item special case of move.
pub fn rename_item(old_path: &Path, new_name: &str) -> Result<(), EngineError> {
    if new_name.trim().is_empty() {
        return Err(EngineError::InvalidArgument {
            message: "New name cannot be empty".to_string(),
        });
    }
    let Some(parent) = old_path.parent() else {
        return Err(EngineError::InvalidArgument {
            message: format!("Cannot rename {}", old_path.display()),
        });
    };

    let new_path = parent.join(new_name);
    fs::rename(old_path, &new_path).map_err(|e| EngineError::io(old_path, e))
}

/// Renames, falling back to copy + delete when the destination is on a
/// different filesystem.
fn rename_or_copy(source: &Path, dest: &Path) -> Result<(), EngineError> {
    match fs::rename(source, dest) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            if source.is_dir() {
                copy_dir_recursive(source, dest)?;
                fs::remove_dir_all(source).map_err(|e| EngineError::io(source, e))
            } else {
                fs::copy(source, dest).map_err(|e| EngineError::io(source, e))?;
                fs::remove_file(source).map_err(|e| EngineError::io(source, e))
            }
        }
        Err(e) => Err(EngineError::io(source, e)),
    }
}
