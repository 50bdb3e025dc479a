//! Authoritative per-pane navigation state.
//!
//! Each pane owns a current path, the last successful listing, and an
//! optional entry to focus. State is replaced wholesale on a successful
//! refresh and left untouched on a failed one, so a pane never shows a
//! listing that doesn't match its path. The store also re-points the pane's
//! filesystem watch on every successful refresh, keeping the path/watch pair
//! consistent in one place.

use std::path::Path;
use std::sync::Mutex;

use crate::bridge::PaneId;
use crate::error::EngineError;
use crate::file_system::listing::{self, DirectoryEntry};
use crate::file_system::watcher::WatcherManager;
use crate::ignore_poison::IgnorePoison;

/// Snapshot of one pane: path, listing, and the entry the UI should focus.
#[derive(Debug, Clone)]
pub struct PaneState {
    pub pane_id: PaneId,
    pub current_path: String,
    pub entries: Vec<DirectoryEntry>,
    pub focus_entry: Option<String>,
}

/// Holds both pane states behind independent locks. Refreshes of the same
/// pane serialize on its lock; the two panes never block each other.
pub struct PaneStore {
    left: Mutex<Option<PaneState>>,
    right: Mutex<Option<PaneState>>,
    watcher: WatcherManager,
}

impl PaneStore {
    pub fn new(watcher: WatcherManager) -> Self {
        Self {
            left: Mutex::new(None),
            right: Mutex::new(None),
            watcher,
        }
    }

    fn slot(&self, pane_id: PaneId) -> &Mutex<Option<PaneState>> {
        match pane_id {
            PaneId::Left => &self.left,
            PaneId::Right => &self.right,
        }
    }

    /// Re-enumerates `path` and, on success, replaces the pane's state and
    /// re-points its watch. On failure the previous state (and watch) stay as
    /// they were. Returns the new snapshot for the caller to push out.
    pub fn refresh(
        &self,
        pane_id: PaneId,
        path: &Path,
        focus_entry: Option<String>,
    ) -> Result<PaneState, EngineError> {
        let mut slot = self.slot(pane_id).lock_ignore_poison();

        let entries = listing::list_directory(path)?;
        self.watcher.set_watch(pane_id, path);

        let state = PaneState {
            pane_id,
            current_path: path.display().to_string(),
            entries,
            focus_entry,
        };
        *slot = Some(state.clone());
        Ok(state)
    }

    /// The pane's current snapshot, if it has been refreshed at least once.
    pub fn snapshot(&self, pane_id: PaneId) -> Option<PaneState> {
        self.slot(pane_id).lock_ignore_poison().clone()
    }

    pub fn current_path(&self, pane_id: PaneId) -> Option<String> {
        self.slot(pane_id)
            .lock_ignore_poison()
            .as_ref()
            .map(|s| s.current_path.clone())
    }

    /// Drops all pane state and tears down both watches.
    pub fn clear(&self) {
        *self.left.lock_ignore_poison() = None;
        *self.right.lock_ignore_poison() = None;
        self.watcher.clear();
    }
}
