//! Engine-wide error taxonomy.
//!
//! Every fallible operation in the engine funnels into [`EngineError`], and the
//! dispatcher converts it into exactly one user-visible error response. The
//! serde tagging matches the wire format of the other bridge types.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors surfaced by the engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineError {
    /// Path or entry does not exist (or is not the expected kind).
    NotFound { path: String },
    /// Create-directory target already exists (directory or file).
    AlreadyExists { path: String },
    /// Move of a directory onto an existing directory.
    TargetExists { path: String },
    /// Access denied on the operation's primary target.
    PermissionDenied { path: String, message: String },
    /// A required argument was present but unusable (disallowed characters,
    /// name too long). Missing/empty arguments are silently ignored upstream
    /// and never reach this variant.
    InvalidArgument { message: String },
    /// The operation's cancellation flag was set mid-flight.
    Cancelled { message: String },
    /// Catch-all for unexpected I/O failures.
    Unknown { path: String, message: String },
}

impl EngineError {
    /// Maps an I/O error to the engine taxonomy, attaching the path it hit.
    pub fn io(path: &Path, err: std::io::Error) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            std::io::ErrorKind::NotFound => EngineError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => EngineError::PermissionDenied {
                path,
                message: err.to_string(),
            },
            std::io::ErrorKind::AlreadyExists => EngineError::AlreadyExists { path },
            _ => EngineError::Unknown {
                path,
                message: err.to_string(),
            },
        }
    }

    /// Returns a human-readable message suitable for an error response.
    pub fn user_message(&self) -> String {
        match self {
            EngineError::NotFound { path } => {
                format!("Cannot find \"{}\". It may have been moved or deleted.", path)
            }
            EngineError::AlreadyExists { path } => {
                format!("\"{}\" already exists.", path)
            }
            EngineError::TargetExists { path } => {
                format!("Target directory already exists: {}", path)
            }
            EngineError::PermissionDenied { path, .. } => {
                format!("Permission denied: \"{}\"", path)
            }
            EngineError::InvalidArgument { message } => message.clone(),
            EngineError::Cancelled { .. } => "Operation was cancelled.".to_string(),
            EngineError::Unknown { path, message } => {
                if path.is_empty() {
                    format!("An error occurred: {}", message)
                } else {
                    format!("Error with \"{}\": {}", path, message)
                }
            }
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user_message())
    }
}

impl std::error::Error for EngineError {}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::io(Path::new(""), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_not_found_maps_to_not_found() {
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let mapped = EngineError::io(Path::new("/tmp/gone"), err);
        assert_eq!(
            mapped,
            EngineError::NotFound {
                path: "/tmp/gone".to_string()
            }
        );
    }

    #[test]
    fn io_permission_denied_keeps_path_and_message() {
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let mapped = EngineError::io(Path::new("/tmp/secret"), err);
        assert!(matches!(mapped, EngineError::PermissionDenied { ref path, .. } if path == "/tmp/secret"));
    }

    #[test]
    fn io_other_maps_to_unknown() {
        let err = std::io::Error::other("boom");
        let mapped = EngineError::io(Path::new("/x"), err);
        assert!(matches!(mapped, EngineError::Unknown { .. }));
    }

    #[test]
    fn serializes_with_type_tag() {
        let err = EngineError::TargetExists {
            path: "/tmp/b".to_string(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("\"type\":\"target_exists\""));
    }
}
