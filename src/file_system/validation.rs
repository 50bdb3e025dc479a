//! Filename validation for rename and create-directory requests.
//!
//! Empty names never reach this point (the dispatcher drops them as no-ops);
//! this checks the names that did arrive for characters and lengths the
//! filesystem would reject anyway, so the user gets a clear message instead
//! of a raw I/O error.

use crate::error::EngineError;

/// Maximum file name length in bytes (common filesystem limit).
pub const MAX_NAME_BYTES: usize = 255;

/// Validates a filename component.
pub fn validate_filename(name: &str) -> Result<(), EngineError> {
    for ch in name.chars() {
        if ch == '/' {
            return Err(EngineError::InvalidArgument {
                message: "Name contains a disallowed character: /".to_string(),
            });
        }
        if ch == '\0' {
            return Err(EngineError::InvalidArgument {
                message: "Name contains a disallowed character: NUL".to_string(),
            });
        }
    }

    if name.len() >= MAX_NAME_BYTES {
        return Err(EngineError::InvalidArgument {
            message: format!(
                "Name is {} bytes, which exceeds the {} byte limit",
                name.len(),
                MAX_NAME_BYTES
            ),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        assert!(validate_filename("document.txt").is_ok());
        assert!(validate_filename("my document.txt").is_ok());
        assert!(validate_filename(".gitignore").is_ok());
        assert!(validate_filename("日本語ファイル.txt").is_ok());
    }

    #[test]
    fn rejects_slash() {
        assert!(matches!(
            validate_filename("foo/bar"),
            Err(EngineError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn rejects_null_byte() {
        assert!(matches!(
            validate_filename("foo\0bar"),
            Err(EngineError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn rejects_name_at_255_bytes() {
        let long = "a".repeat(255);
        assert!(validate_filename(&long).is_err());
    }

    #[test]
    fn accepts_name_at_254_bytes() {
        let name = "a".repeat(254);
        assert!(validate_filename(&name).is_ok());
    }
}
