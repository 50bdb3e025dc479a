//! Per-pane filesystem watching with debouncing.
//!
//! Each pane has at most one live watch. Raw notify events are debounced and
//! collapsed into a single logical "pane dirty" message on a channel the
//! dispatcher consumes; watcher lifecycle is fully decoupled from refresh
//! lifecycle.

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{DebounceEventResult, Debouncer, RecommendedCache, new_debouncer};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use crate::bridge::PaneId;
use crate::ignore_poison::IgnorePoison;

/// A watched directory changed; the pane's listing is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaneDirtyEvent {
    pub pane_id: PaneId,
    pub path: PathBuf,
}

/// State for one pane's watch. The debouncer must be held to keep watching;
/// dropping it stops event delivery and releases the OS watch.
struct PaneWatch {
    path: PathBuf,
    #[allow(dead_code, reason = "Debouncer must be held to keep watching")]
    debouncer: Debouncer<RecommendedWatcher, RecommendedCache>,
}

/// Owns the filesystem watches, one per pane.
pub struct WatcherManager {
    watches: Mutex<HashMap<PaneId, PaneWatch>>,
    dirty_tx: UnboundedSender<PaneDirtyEvent>,
    debounce: Duration,
}

impl WatcherManager {
    pub fn new(debounce: Duration, dirty_tx: UnboundedSender<PaneDirtyEvent>) -> Self {
        Self {
            watches: Mutex::new(HashMap::new()),
            dirty_tx,
            debounce,
        }
    }

    /// Replaces the watch for a pane. The previous watch is torn down before
    /// the new one is established, so at most one watch per pane is ever
    /// active.
    ///
    /// Failures are logged and swallowed: the listing that triggered this
    /// call already succeeded and must not be invalidated by a failed
    /// live-update subscription.
    pub fn set_watch(&self, pane_id: PaneId, path: &Path) {
        let mut watches = self.watches.lock_ignore_poison();

        // Dropping the old PaneWatch stops its event delivery.
        watches.remove(&pane_id);

        let tx = self.dirty_tx.clone();
        let event_path = path.to_path_buf();
        let mut debouncer = match new_debouncer(
            self.debounce,
            None,
            move |result: DebounceEventResult| {
                // Any burst of created/deleted/renamed/modified events within
                // the debounce window collapses to one dirty notification.
                // Watcher errors often mean the directory itself went away;
                // the re-listing downstream sorts that out.
                if let Err(errors) = &result {
                    log::debug!("Watcher error for {}: {:?}", event_path.display(), errors);
                }
                let _ = tx.send(PaneDirtyEvent {
                    pane_id,
                    path: event_path.clone(),
                });
            },
        ) {
            Ok(debouncer) => debouncer,
            Err(e) => {
                log::warn!("Failed to create watcher for {}: {}", path.display(), e);
                return;
            }
        };

        if let Err(e) = debouncer.watch(path, RecursiveMode::NonRecursive) {
            log::warn!("Failed to watch {}: {}", path.display(), e);
            return;
        }

        watches.insert(
            pane_id,
            PaneWatch {
                path: path.to_path_buf(),
                debouncer,
            },
        );
    }

    /// The path a pane is currently watching, if any.
    pub fn watched_path(&self, pane_id: PaneId) -> Option<PathBuf> {
        self.watches
            .lock_ignore_poison()
            .get(&pane_id)
            .map(|w| w.path.clone())
    }

    /// Tears down all watches. Called on engine shutdown.
    pub fn clear(&self) {
        self.watches.lock_ignore_poison().clear();
    }
}
