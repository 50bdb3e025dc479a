//! Persisted application state: the last path of each pane.
//!
//! Stored as a small JSON file in the platform config directory. Loading is
//! forgiving: a missing or unreadable file yields the defaults, and a
//! persisted path that no longer exists falls back to the home directory so
//! the panes always open somewhere valid.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EngineError;

const CONFIG_DIR_NAME: &str = "commandman";
const CONFIG_FILE_NAME: &str = "config.json";

/// The state worth remembering across runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub left_path: String,
    pub right_path: String,
}

impl Default for AppState {
    fn default() -> Self {
        let home = fallback_path();
        Self {
            left_path: home.clone(),
            right_path: home,
        }
    }
}

/// Where the state file lives: `<config_dir>/commandman/config.json`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Loads state from `path`, substituting the home directory for any pane
/// path that no longer exists. Never fails: corruption and absence both
/// yield the defaults.
pub fn load_state(path: &Path) -> AppState {
    let mut state = match fs::read_to_string(path) {
        Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Ignoring corrupt state file {}: {}", path.display(), e);
            AppState::default()
        }),
        Err(_) => AppState::default(),
    };

    if !Path::new(&state.left_path).is_dir() {
        state.left_path = fallback_path();
    }
    if !Path::new(&state.right_path).is_dir() {
        state.right_path = fallback_path();
    }
    state
}

/// Writes state to `path`, creating parent directories as needed.
pub fn save_state(path: &Path, state: &AppState) -> Result<(), EngineError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| EngineError::io(parent, e))?;
    }
    let json = serde_json::to_string_pretty(state).map_err(|e| EngineError::Unknown {
        path: path.display().to_string(),
        message: format!("Failed to serialize state: {}", e),
    })?;
    fs::write(path, json).map_err(|e| EngineError::io(path, e))
}

fn fallback_path() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("/"))
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trips_through_the_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("nested/config.json");
        let state = AppState {
            left_path: dir.path().display().to_string(),
            right_path: dir.path().display().to_string(),
        };

        save_state(&file, &state).unwrap();
        assert_eq!(load_state(&file), state);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let state = load_state(&dir.path().join("absent.json"));
        assert!(Path::new(&state.left_path).is_dir());
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.json");
        fs::write(&file, "{not json").unwrap();

        let state = load_state(&file);
        assert!(Path::new(&state.left_path).is_dir());
    }

    #[test]
    fn vanished_pane_path_falls_back_to_home() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("config.json");
        let gone = dir.path().join("was-here");
        fs::create_dir(&gone).unwrap();
        save_state(
            &file,
            &AppState {
                left_path: gone.display().to_string(),
                right_path: dir.path().display().to_string(),
            },
        )
        .unwrap();
        fs::remove_dir(&gone).unwrap();

        let state = load_state(&file);
        assert_ne!(state.left_path, gone.display().to_string());
        assert_eq!(state.right_path, dir.path().display().to_string());
    }

    #[test]
    fn uses_camel_case_on_disk() {
        let json = serde_json::to_string(&AppState {
            left_path: "/a".to_string(),
            right_path: "/b".to_string(),
        })
        .unwrap();
        assert!(json.contains("\"leftPath\":\"/a\""));
        assert!(json.contains("\"rightPath\":\"/b\""));
    }
}
