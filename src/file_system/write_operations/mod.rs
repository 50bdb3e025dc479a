//! Bulk write operations (copy, move, delete) with streaming progress.
//!
//! Every accepted request is acknowledged immediately and executed on a
//! blocking worker, so interactive requests stay responsive while an
//! operation is in flight. Items are processed strictly sequentially under a
//! single-operation lock; progress is published before each item, a terminal
//! `("Complete", 100)` after the last one, and the idle sentinel is always
//! published afterwards, success or failure, so the UI never shows a stale
//! progress bar.

mod copy;
mod delete;
mod move_op;
mod types;

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

use crate::bridge::{PaneId, Response};
use crate::error::EngineError;
use crate::panes::PaneStore;
use crate::progress::ProgressChannel;

pub use move_op::rename_item;
pub use types::{BulkOperation, OperationKind, OperationState, OperationStatus};

/// Executes bulk operations, one at a time.
pub struct BulkOperationEngine {
    /// Admits one active operation system-wide; later requests queue here.
    op_lock: tokio::sync::Mutex<()>,
    /// In-flight operation states, keyed by operation id, for cancellation.
    active: RwLock<HashMap<String, Arc<OperationState>>>,
    progress: ProgressChannel,
    panes: Arc<PaneStore>,
    outbound: UnboundedSender<Response>,
    /// Grace delay between the terminal emission and the idle sentinel.
    copy_grace: Duration,
    delete_grace: Duration,
}

impl BulkOperationEngine {
    pub fn new(
        progress: ProgressChannel,
        panes: Arc<PaneStore>,
        outbound: UnboundedSender<Response>,
        copy_grace: Duration,
        delete_grace: Duration,
    ) -> Self {
        Self {
            op_lock: tokio::sync::Mutex::new(()),
            active: RwLock::new(HashMap::new()),
            progress,
            panes,
            outbound,
            copy_grace,
            delete_grace,
        }
    }

    /// Accepts a bulk operation and spawns its worker. Returns the operation
    /// id immediately; progress and completion arrive asynchronously.
    pub fn start(
        self: &Arc<Self>,
        kind: OperationKind,
        sources: Vec<PathBuf>,
        target: Option<PathBuf>,
        pane_id: PaneId,
    ) -> String {
        let operation_id = Uuid::new_v4().to_string();
        let state = Arc::new(OperationState::new());
        if let Ok(mut active) = self.active.write() {
            active.insert(operation_id.clone(), Arc::clone(&state));
        }
        log::info!(
            "{}: starting {} of {} item(s)",
            operation_id,
            kind.verb(),
            sources.len()
        );

        let operation = BulkOperation {
            id: operation_id.clone(),
            kind,
            sources,
            target,
            pane_id,
        };
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            engine.run(operation, state).await;
        });

        operation_id
    }

    /// Sets the cancellation flag of an in-flight operation. The worker
    /// checks it before each item.
    pub fn cancel_operation(&self, operation_id: &str) {
        if let Ok(active) = self.active.read() {
            if let Some(state) = active.get(operation_id) {
                state.cancel();
            }
        }
    }

    /// Cancels every in-flight operation. Called on engine shutdown.
    pub fn cancel_all(&self) {
        if let Ok(active) = self.active.read() {
            for state in active.values() {
                state.cancel();
            }
        }
    }

    /// Status of an operation, or `None` once it has finished and been
    /// unregistered.
    pub fn operation_status(&self, operation_id: &str) -> Option<OperationStatus> {
        self.active
            .read()
            .ok()?
            .get(operation_id)
            .map(|state| state.status())
    }

    pub fn has_active_operations(&self) -> bool {
        self.active.read().map(|a| !a.is_empty()).unwrap_or(false)
    }

    async fn run(&self, operation: BulkOperation, state: Arc<OperationState>) {
        let _running = self.op_lock.lock().await;
        state.set_status(OperationStatus::Running);

        let progress = self.progress.clone();
        let worker_state = Arc::clone(&state);
        let worker_operation = operation.clone();
        let result =
            tokio::task::spawn_blocking(move || execute(&worker_operation, &worker_state, &progress))
                .await;
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => Err(EngineError::Unknown {
                path: String::new(),
                message: format!("Worker task failed: {}", e),
            }),
        };

        match &outcome {
            Ok(()) => {
                self.progress.publish("Complete", 100);
                // Let the user see the finished bar before it goes away.
                tokio::time::sleep(self.grace_for(operation.kind)).await;
                state.set_status(OperationStatus::Completed);
            }
            Err(e) => {
                state.set_status(OperationStatus::Failed);
                let _ = self.outbound.send(Response::Error {
                    error: format!("{} failed: {}", operation.kind.verb(), e.user_message()),
                });
            }
        }

        // Always, success or failure: the UI must never keep a stale bar.
        self.progress.clear();
        self.refresh_after(&operation).await;

        if let Ok(mut active) = self.active.write() {
            active.remove(&operation.id);
        }
        log::debug!("{}: finished ({:?})", operation.id, state.status());
    }

    fn grace_for(&self, kind: OperationKind) -> Duration {
        match kind {
            OperationKind::Delete => self.delete_grace,
            OperationKind::Copy | OperationKind::Move => self.copy_grace,
        }
    }

    /// Refreshes the panes an operation touched: the source pane at the
    /// items' common parent, and for copy/move the other pane at the target.
    async fn refresh_after(&self, operation: &BulkOperation) {
        match operation.kind {
            OperationKind::Delete => {
                self.refresh_source_pane(operation).await;
            }
            OperationKind::Copy => {
                self.refresh_target_pane(operation).await;
            }
            OperationKind::Move => {
                self.refresh_target_pane(operation).await;
                self.refresh_source_pane(operation).await;
            }
        }
    }

    async fn refresh_source_pane(&self, operation: &BulkOperation) {
        let parent = operation
            .sources
            .first()
            .and_then(|p| p.parent())
            .map(PathBuf::from);
        if let Some(parent) = parent {
            self.refresh_pane(operation.pane_id, parent).await;
        }
    }

    async fn refresh_target_pane(&self, operation: &BulkOperation) {
        if let Some(target) = operation.target.clone() {
            self.refresh_pane(operation.pane_id.other(), target).await;
        }
    }

    async fn refresh_pane(&self, pane_id: PaneId, path: PathBuf) {
        let panes = Arc::clone(&self.panes);
        let refreshed =
            tokio::task::spawn_blocking(move || panes.refresh(pane_id, &path, None)).await;
        match refreshed {
            Ok(Ok(pane_state)) => {
                let _ = self.outbound.send(Response::DirectoryContents {
                    data: pane_state.entries,
                    current_path: pane_state.current_path,
                    pane_id: Some(pane_id),
                    focus_item: None,
                });
            }
            Ok(Err(e)) => {
                log::warn!("Post-operation refresh of {:?} pane failed: {}", pane_id, e)
            }
            Err(e) => log::warn!("Post-operation refresh task failed: {}", e),
        }
    }
}

/// Runs an operation's items sequentially on the worker thread.
///
/// Progress is published *before* each item, so the label names the item
/// about to be processed: `floor(items_done / total * 100)`. The first
/// failing item aborts the remainder and becomes the operation's single
/// aggregate error.
fn execute(
    operation: &BulkOperation,
    state: &OperationState,
    progress: &ProgressChannel,
) -> Result<(), EngineError> {
    let total = operation.sources.len();
    for (index, source) in operation.sources.iter().enumerate() {
        if state.is_cancelled() {
            return Err(EngineError::Cancelled {
                message: "Operation cancelled".to_string(),
            });
        }

        let item_label = source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| source.display().to_string());
        let percent = (index * 100 / total) as u8;
        progress.publish(format!("{} {}...", operation.kind.gerund(), item_label), percent);

        match operation.kind {
            OperationKind::Delete => delete::delete_item(source)?,
            OperationKind::Copy => copy::copy_item(source, require_target(operation)?)?,
            OperationKind::Move => move_op::move_item(source, require_target(operation)?)?,
        }
    }
    Ok(())
}

fn require_target(operation: &BulkOperation) -> Result<&std::path::Path, EngineError> {
    operation
        .target
        .as_deref()
        .ok_or_else(|| EngineError::InvalidArgument {
            message: format!("{} requires a target path", operation.kind.verb()),
        })
}
