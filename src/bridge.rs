//! Tagged request/response messages exchanged with the UI layer.
//!
//! The transport is out of scope; these types define the shape of what goes
//! over it. Requests are defensively optional: a missing or empty required
//! field makes the request a no-op rather than an error.

use serde::{Deserialize, Serialize};

use crate::drives::DriveItem;
use crate::file_system::listing::DirectoryEntry;
use crate::settings::AppState;

/// One of the two directory views the UI displays. Exactly two exist for the
/// lifetime of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaneId {
    Left,
    Right,
}

impl PaneId {
    /// The opposite pane. Copy/move infer their destination pane as "the
    /// other pane" relative to the originating one.
    pub fn other(self) -> Self {
        match self {
            PaneId::Left => PaneId::Right,
            PaneId::Right => PaneId::Left,
        }
    }
}

/// A request from the UI layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Request {
    ListDirectory {
        path: Option<String>,
        pane_id: Option<PaneId>,
    },
    ListDrives,
    GetAppInfo,
    GetState,
    SaveState {
        state: Option<AppState>,
    },
    CreateDirectory {
        path: Option<String>,
        name: Option<String>,
        pane_id: Option<PaneId>,
    },
    OpenPath {
        path: Option<String>,
    },
    DeleteItems {
        items: Option<Vec<String>>,
        pane_id: Option<PaneId>,
    },
    RenameItem {
        path: Option<String>,
        name: Option<String>,
        pane_id: Option<PaneId>,
    },
    CopyItems {
        items: Option<Vec<String>>,
        target_path: Option<String>,
        pane_id: Option<PaneId>,
    },
    MoveItems {
        items: Option<Vec<String>>,
        target_path: Option<String>,
        pane_id: Option<PaneId>,
    },
}

/// A response pushed to the UI layer. Responses are not paired one-to-one
/// with requests: `RefreshPane` is unsolicited (watch-driven), and a bulk
/// operation pushes its post-completion listings asynchronously.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Response {
    DirectoryContents {
        data: Vec<DirectoryEntry>,
        current_path: String,
        pane_id: Option<PaneId>,
        focus_item: Option<String>,
    },
    Drives {
        drives: Vec<DriveItem>,
    },
    AppInfo {
        data: AppInfo,
    },
    State {
        data: AppState,
    },
    RefreshPane {
        pane_id: PaneId,
        current_path: String,
    },
    Error {
        error: String,
    },
}

/// Name and version reported by `getAppInfo`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppInfo {
    pub app_name: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_copy_items_request() {
        let json = r#"{
            "action": "copyItems",
            "items": ["/docs/a.txt", "/docs/sub"],
            "targetPath": "/backup",
            "paneId": "left"
        }"#;
        let request: Request = serde_json::from_str(json).unwrap();
        match request {
            Request::CopyItems {
                items,
                target_path,
                pane_id,
            } => {
                assert_eq!(items.unwrap().len(), 2);
                assert_eq!(target_path.as_deref(), Some("/backup"));
                assert_eq!(pane_id, Some(PaneId::Left));
            }
            other => panic!("unexpected request: {:?}", other),
        }
    }

    #[test]
    fn deserializes_request_with_missing_fields() {
        let json = r#"{"action": "listDirectory"}"#;
        let request: Request = serde_json::from_str(json).unwrap();
        assert!(matches!(
            request,
            Request::ListDirectory {
                path: None,
                pane_id: None
            }
        ));
    }

    #[test]
    fn serializes_refresh_pane_response() {
        let response = Response::RefreshPane {
            pane_id: PaneId::Right,
            current_path: "/tmp".to_string(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"action\":\"refreshPane\""));
        assert!(json.contains("\"paneId\":\"right\""));
        assert!(json.contains("\"currentPath\":\"/tmp\""));
    }

    #[test]
    fn pane_other_flips() {
        assert_eq!(PaneId::Left.other(), PaneId::Right);
        assert_eq!(PaneId::Right.other(), PaneId::Left);
    }
}
