//! Command dispatcher: tagged requests in, tagged responses out.
//!
//! The dispatcher is the only boundary between the UI transport and the
//! engine internals. Validation is defensive: a request missing a required
//! field is dropped silently (malformed UI messages must never take the
//! engine down), while a request that names real work and fails produces
//! exactly one `Response::Error` with a human-readable message.
//!
//! Synchronous actions run inline (listing on a blocking worker); bulk
//! actions are handed to the operation engine and acknowledged by the
//! responses that engine pushes later. Watch-driven `refreshPane` responses
//! are forwarded unsolicited from the dirty-event channel.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::bridge::{AppInfo, PaneId, Request, Response};
use crate::drives;
use crate::error::EngineError;
use crate::file_system::operations;
use crate::file_system::watcher::WatcherManager;
use crate::file_system::write_operations::{self, BulkOperationEngine, OperationKind};
use crate::panes::PaneStore;
use crate::progress::ProgressChannel;
use crate::settings::{self, AppState};

/// Tunables for the engine. The defaults match the application's shipped
/// behavior; tests shrink the delays.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Window within which raw watch events collapse to one dirty signal.
    pub debounce: Duration,
    /// Pause between a copy/move's terminal emission and the idle sentinel.
    pub copy_grace: Duration,
    /// Same pause for delete, traditionally shorter.
    pub delete_grace: Duration,
    /// Where pane state persists; `None` uses the platform config directory.
    pub config_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(200),
            copy_grace: Duration::from_millis(500),
            delete_grace: Duration::from_millis(300),
            config_path: None,
        }
    }
}

/// The engine facade the UI transport talks to.
pub struct Engine {
    panes: Arc<PaneStore>,
    bulk: Arc<BulkOperationEngine>,
    progress: ProgressChannel,
    outbound: UnboundedSender<Response>,
    config_path: Option<PathBuf>,
}

impl Engine {
    /// Builds the engine and returns it together with the response stream.
    /// Must be called inside a tokio runtime; the dirty-event forwarder is
    /// spawned here.
    pub fn new(config: EngineConfig) -> (Arc<Self>, UnboundedReceiver<Response>) {
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (dirty_tx, mut dirty_rx) = mpsc::unbounded_channel();

        let panes = Arc::new(PaneStore::new(WatcherManager::new(
            config.debounce,
            dirty_tx,
        )));
        let progress = ProgressChannel::new();
        let bulk = Arc::new(BulkOperationEngine::new(
            progress.clone(),
            Arc::clone(&panes),
            outbound_tx.clone(),
            config.copy_grace,
            config.delete_grace,
        ));

        // A debounced change in a watched directory becomes an unsolicited
        // refreshPane; the UI answers with a listDirectory of its own.
        let forward_tx = outbound_tx.clone();
        tokio::spawn(async move {
            while let Some(event) = dirty_rx.recv().await {
                let _ = forward_tx.send(Response::RefreshPane {
                    pane_id: event.pane_id,
                    current_path: event.path.display().to_string(),
                });
            }
        });

        let engine = Arc::new(Self {
            panes,
            bulk,
            progress,
            outbound: outbound_tx,
            config_path: config.config_path,
        });
        (engine, outbound_rx)
    }

    /// The progress stream for bulk operations.
    pub fn progress(&self) -> &ProgressChannel {
        &self.progress
    }

    /// Cancels in-flight operations and tears down pane state and watches.
    pub fn shutdown(&self) {
        self.bulk.cancel_all();
        self.panes.clear();
        log::info!("Engine shut down");
    }

    /// Handles one request. Responses, if any, arrive on the outbound
    /// channel; a request with missing required fields is a silent no-op.
    pub async fn handle_request(&self, request: Request) {
        match request {
            Request::ListDirectory { path, pane_id } => {
                let (Some(path), Some(pane_id)) = (non_empty(path), pane_id) else {
                    log::debug!("Ignoring listDirectory with missing fields");
                    return;
                };
                self.refresh_and_push(pane_id, PathBuf::from(path), None).await;
            }
            Request::ListDrives => {
                let drives = tokio::task::spawn_blocking(drives::list_drives).await;
                match drives {
                    Ok(drives) => self.push(Response::Drives { drives }),
                    Err(e) => self.push_error(format!("Drive enumeration failed: {}", e)),
                }
            }
            Request::GetAppInfo => {
                self.push(Response::AppInfo {
                    data: AppInfo {
                        app_name: env!("CARGO_PKG_NAME").to_string(),
                        version: env!("CARGO_PKG_VERSION").to_string(),
                    },
                });
            }
            Request::GetState => {
                let state = match self.state_path() {
                    Some(path) => {
                        tokio::task::spawn_blocking(move || settings::load_state(&path))
                            .await
                            .unwrap_or_default()
                    }
                    None => AppState::default(),
                };
                self.push(Response::State { data: state });
            }
            Request::SaveState { state } => {
                let Some(state) = state else {
                    log::debug!("Ignoring saveState with no state");
                    return;
                };
                let Some(path) = self.state_path() else {
                    log::warn!("No config directory available; state not saved");
                    return;
                };
                let saved =
                    tokio::task::spawn_blocking(move || settings::save_state(&path, &state)).await;
                if let Ok(Err(e)) = saved {
                    self.push_error(format!("Failed to save state: {}", e.user_message()));
                }
            }
            Request::CreateDirectory { path, name, pane_id } => {
                let (Some(path), Some(name), Some(pane_id)) =
                    (non_empty(path), non_empty(name), pane_id)
                else {
                    log::debug!("Ignoring createDirectory with missing fields");
                    return;
                };
                let parent = PathBuf::from(path);
                let create_parent = parent.clone();
                let create_name = name.clone();
                let created = tokio::task::spawn_blocking(move || {
                    operations::create_directory(&create_parent, &create_name)
                })
                .await;
                match flatten(created) {
                    Ok(_) => self.refresh_and_push(pane_id, parent, Some(name)).await,
                    Err(e) => self.push_error(e.user_message()),
                }
            }
            Request::OpenPath { path } => {
                let Some(path) = non_empty(path) else {
                    log::debug!("Ignoring openPath with no path");
                    return;
                };
                let opened = tokio::task::spawn_blocking(move || {
                    operations::open_path(Path::new(&path))
                })
                .await;
                if let Err(e) = flatten(opened) {
                    self.push_error(e.user_message());
                }
            }
            Request::RenameItem { path, name, pane_id } => {
                let (Some(path), Some(name), Some(pane_id)) =
                    (non_empty(path), non_empty(name), pane_id)
                else {
                    log::debug!("Ignoring renameItem with missing fields");
                    return;
                };
                let old_path = PathBuf::from(path);
                let rename_path = old_path.clone();
                let rename_name = name.clone();
                let renamed = tokio::task::spawn_blocking(move || {
                    write_operations::rename_item(&rename_path, &rename_name)
                })
                .await;
                match flatten(renamed) {
                    Ok(()) => {
                        if let Some(parent) = old_path.parent() {
                            self.refresh_and_push(pane_id, parent.to_path_buf(), Some(name))
                                .await;
                        }
                    }
                    Err(e) => self.push_error(e.user_message()),
                }
            }
            Request::DeleteItems { items, pane_id } => {
                let (Some(items), Some(pane_id)) = (non_empty_paths(items), pane_id) else {
                    log::debug!("Ignoring deleteItems with missing fields");
                    return;
                };
                self.bulk.start(OperationKind::Delete, items, None, pane_id);
            }
            Request::CopyItems {
                items,
                target_path,
                pane_id,
            } => self.start_transfer(OperationKind::Copy, items, target_path, pane_id),
            Request::MoveItems {
                items,
                target_path,
                pane_id,
            } => self.start_transfer(OperationKind::Move, items, target_path, pane_id),
        }
    }

    fn start_transfer(
        &self,
        kind: OperationKind,
        items: Option<Vec<String>>,
        target_path: Option<String>,
        pane_id: Option<PaneId>,
    ) {
        let (Some(items), Some(target), Some(pane_id)) =
            (non_empty_paths(items), non_empty(target_path), pane_id)
        else {
            log::debug!("Ignoring {} request with missing fields", kind.verb());
            return;
        };
        self.bulk
            .start(kind, items, Some(PathBuf::from(target)), pane_id);
    }

    async fn refresh_and_push(&self, pane_id: PaneId, path: PathBuf, focus: Option<String>) {
        let panes = Arc::clone(&self.panes);
        let refreshed =
            tokio::task::spawn_blocking(move || panes.refresh(pane_id, &path, focus)).await;
        match flatten(refreshed) {
            Ok(state) => self.push(Response::DirectoryContents {
                data: state.entries,
                current_path: state.current_path,
                pane_id: Some(pane_id),
                focus_item: state.focus_entry,
            }),
            Err(e) => self.push_error(e.user_message()),
        }
    }

    fn state_path(&self) -> Option<PathBuf> {
        self.config_path
            .clone()
            .or_else(settings::default_config_path)
    }

    fn push(&self, response: Response) {
        let _ = self.outbound.send(response);
    }

    fn push_error(&self, error: String) {
        log::warn!("Request failed: {}", error);
        self.push(Response::Error { error });
    }
}

/// Collapses a `spawn_blocking` join result into the inner engine result.
fn flatten<T>(
    joined: Result<Result<T, EngineError>, tokio::task::JoinError>,
) -> Result<T, EngineError> {
    match joined {
        Ok(result) => result,
        Err(e) => Err(EngineError::Unknown {
            path: String::new(),
            message: format!("Worker task failed: {}", e),
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn non_empty_paths(items: Option<Vec<String>>) -> Option<Vec<PathBuf>> {
    let items = items?;
    if items.is_empty() || items.iter().any(|s| s.trim().is_empty()) {
        return None;
    }
    Some(items.into_iter().map(PathBuf::from).collect())
}
