//! Copy implementation: recursive, silently overwriting (last write wins).

use std::fs;
use std::path::Path;

use crate::error::EngineError;

/// Copies one source item into the target directory.
///
/// Directories are copied recursively, merging into an existing destination
/// tree; files at the destination are overwritten.
pub(super) fn copy_item(source: &Path, target_dir: &Path) -> Result<(), EngineError> {
    let Some(file_name) = source.file_name() else {
        return Err(EngineError::InvalidArgument {
            message: format!("Invalid source path: {}", source.display()),
        });
    };
    let dest = target_dir.join(file_name);

    if source.is_dir() {
        copy_dir_recursive(source, &dest)
    } else {
        fs::copy(source, &dest)
            .map(|_| ())
            .map_err(|e| EngineError::io(source, e))
    }
}

/// Recreates the source directory structure under `dest` and copies every
/// contained file.
pub(super) fn copy_dir_recursive(source: &Path, dest: &Path) -> Result<(), EngineError> {
    fs::create_dir_all(dest).map_err(|e| EngineError::io(dest, e))?;

    for entry in fs::read_dir(source).map_err(|e| EngineError::io(source, e))? {
        let entry = entry.map_err(|e| EngineError::io(source, e))?;
        let entry_path = entry.path();
        let entry_dest = dest.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| EngineError::io(&entry_path, e))?;

        if file_type.is_dir() {
            copy_dir_recursive(&entry_path, &entry_dest)?;
        } else {
            fs::copy(&entry_path, &entry_dest).map_err(|e| EngineError::io(&entry_path, e))?;
        }
    }

    Ok(())
}
