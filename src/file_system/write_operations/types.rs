//! Types for bulk write operations.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::bridge::PaneId;
use crate::ignore_poison::IgnorePoison;

/// Kind of bulk operation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Copy,
    Move,
    Delete,
}

impl OperationKind {
    /// Noun form, for error responses ("Copy failed: ...").
    pub fn verb(self) -> &'static str {
        match self {
            OperationKind::Copy => "Copy",
            OperationKind::Move => "Move",
            OperationKind::Delete => "Delete",
        }
    }

    /// Progress-label form ("Copying a.txt...").
    pub fn gerund(self) -> &'static str {
        match self {
            OperationKind::Copy => "Copying",
            OperationKind::Move => "Moving",
            OperationKind::Delete => "Deleting",
        }
    }
}

/// Lifecycle of one bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

/// One accepted bulk request. Sources are processed in order; duplicates are
/// the caller's responsibility.
#[derive(Debug, Clone)]
pub struct BulkOperation {
    pub id: String,
    pub kind: OperationKind,
    pub sources: Vec<PathBuf>,
    /// Destination directory; absent for delete.
    pub target: Option<PathBuf>,
    /// The pane the request originated from.
    pub pane_id: PaneId,
}

/// Shared state for an in-flight operation. The cancellation flag is the
/// boundary a future "Cancel" affordance plugs into; the worker checks it
/// before every item.
pub struct OperationState {
    cancelled: AtomicBool,
    status: Mutex<OperationStatus>,
}

impl OperationState {
    pub fn new() -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            status: Mutex::new(OperationStatus::Pending),
        }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    pub fn set_status(&self, status: OperationStatus) {
        *self.status.lock_ignore_poison() = status;
    }

    pub fn status(&self) -> OperationStatus {
        *self.status.lock_ignore_poison()
    }
}

impl Default for OperationState {
    fn default() -> Self {
        Self::new()
    }
}
