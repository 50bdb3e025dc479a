//! Directory enumeration.
//!
//! Pure, side-effect-free I/O: reads a directory once and builds an ordered
//! snapshot of [`DirectoryEntry`] values. Safe to call concurrently for
//! different paths. Consumed by the pane state store.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use crate::error::EngineError;

/// An immutable snapshot of one directory entry. Regenerated on every
/// listing; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryEntry {
    pub name: String,
    /// Absolute path.
    pub path: String,
    pub is_directory: bool,
    /// 0 for directories.
    pub size: u64,
    /// Unix seconds; `None` when the timestamp could not be read.
    pub modified: Option<u64>,
    /// Lowercased extension without the dot; `None` for directories and
    /// extensionless files.
    pub extension: Option<String>,
}

/// Lists the contents of a directory.
///
/// Order: a synthetic ".." entry pointing at the parent (omitted at a
/// filesystem root), then subdirectories, then files, each group in the
/// order the filesystem yields them. No re-sort is applied.
///
/// Entries whose metadata cannot be read are skipped; a partial listing is
/// preferable to a failed one. Fails with `NotFound` if the path is missing
/// or not a directory.
pub fn list_directory(path: &Path) -> Result<Vec<DirectoryEntry>, EngineError> {
    let metadata = fs::metadata(path).map_err(|e| EngineError::io(path, e))?;
    if !metadata.is_dir() {
        return Err(EngineError::NotFound {
            path: path.display().to_string(),
        });
    }

    let mut entries = Vec::new();
    if let Some(parent) = path.parent() {
        entries.push(DirectoryEntry {
            name: "..".to_string(),
            path: parent.display().to_string(),
            is_directory: true,
            size: 0,
            modified: None,
            extension: None,
        });
    }

    let mut dirs = Vec::new();
    let mut files = Vec::new();
    for dir_entry in fs::read_dir(path).map_err(|e| EngineError::io(path, e))? {
        // Skip entries that disappear or deny access mid-enumeration.
        let Ok(dir_entry) = dir_entry else { continue };
        let Some(entry) = build_entry(&dir_entry) else {
            continue;
        };
        if entry.is_directory {
            dirs.push(entry);
        } else {
            files.push(entry);
        }
    }
    entries.extend(dirs);
    entries.extend(files);

    Ok(entries)
}

/// Builds a [`DirectoryEntry`] from a raw directory entry, or `None` when
/// its metadata cannot be read.
fn build_entry(dir_entry: &fs::DirEntry) -> Option<DirectoryEntry> {
    let metadata = dir_entry.metadata().ok()?;
    let name = dir_entry.file_name().to_string_lossy().to_string();
    let entry_path = dir_entry.path();
    let is_directory = metadata.is_dir();

    let modified = metadata
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs());

    let extension = if is_directory {
        None
    } else {
        entry_path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
    };

    Some(DirectoryEntry {
        name,
        path: entry_path.display().to_string(),
        is_directory,
        size: if is_directory { 0 } else { metadata.len() },
        modified,
        extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn populate(dir: &TempDir) {
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("a.txt"), "hello").unwrap();
        fs::write(dir.path().join("noext"), "").unwrap();
    }

    #[test]
    fn lists_parent_then_dirs_then_files() {
        let dir = TempDir::new().unwrap();
        populate(&dir);

        let entries = list_directory(dir.path()).unwrap();
        assert_eq!(entries[0].name, "..");
        assert_eq!(entries[0].path, dir.path().parent().unwrap().display().to_string());
        assert!(entries[0].is_directory);

        let dir_positions: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.is_directory && e.name != "..")
            .map(|(i, _)| i)
            .collect();
        let file_positions: Vec<usize> = entries
            .iter()
            .enumerate()
            .filter(|(_, e)| !e.is_directory)
            .map(|(i, _)| i)
            .collect();
        assert!(dir_positions.iter().all(|d| file_positions.iter().all(|f| d < f)));
    }

    #[test]
    fn entries_are_direct_children_or_the_parent() {
        let dir = TempDir::new().unwrap();
        populate(&dir);

        let parent = dir.path().parent().unwrap().display().to_string();
        for entry in list_directory(dir.path()).unwrap() {
            if entry.name == ".." {
                assert_eq!(entry.path, parent);
            } else {
                assert_eq!(
                    Path::new(&entry.path).parent().unwrap(),
                    dir.path(),
                    "{} is not a direct child",
                    entry.path
                );
            }
        }
    }

    #[test]
    fn root_has_no_parent_entry() {
        let entries = list_directory(Path::new("/")).unwrap();
        assert!(entries.iter().all(|e| e.name != ".."));
    }

    #[test]
    fn file_metadata_is_captured() {
        let dir = TempDir::new().unwrap();
        populate(&dir);

        let entries = list_directory(dir.path()).unwrap();
        let file = entries.iter().find(|e| e.name == "a.txt").unwrap();
        assert!(!file.is_directory);
        assert_eq!(file.size, 5);
        assert_eq!(file.extension.as_deref(), Some("txt"));
        assert!(file.modified.is_some());

        let bare = entries.iter().find(|e| e.name == "noext").unwrap();
        assert_eq!(bare.extension, None);

        let sub = entries.iter().find(|e| e.name == "sub").unwrap();
        assert!(sub.is_directory);
        assert_eq!(sub.size, 0);
        assert_eq!(sub.extension, None);
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let result = list_directory(&dir.path().join("gone"));
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }

    #[test]
    fn file_path_is_not_found() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "x").unwrap();
        let result = list_directory(&file);
        assert!(matches!(result, Err(EngineError::NotFound { .. })));
    }
}
