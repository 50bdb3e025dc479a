//! Small synchronous filesystem actions handled inline by the dispatcher.

use std::fs;
use std::path::{Path, PathBuf};

use super::validation::validate_filename;
use crate::error::EngineError;

/// Creates a new directory named `name` under `parent`. Fails with
/// `AlreadyExists` if an entry with that name is already there.
pub fn create_directory(parent: &Path, name: &str) -> Result<PathBuf, EngineError> {
    validate_filename(name)?;
    let path = parent.join(name);
    fs::create_dir(&path).map_err(|e| EngineError::io(&path, e))?;
    Ok(path)
}

/// Hands a path to the OS default handler (file association or file
/// manager). What happens after the hand-off is the OS's business.
pub fn open_path(path: &Path) -> Result<(), EngineError> {
    opener::open(path).map_err(|e| EngineError::Unknown {
        path: path.display().to_string(),
        message: format!("Failed to open: {}", e),
    })
}
