//! Broadcast channel for bulk-operation progress.
//!
//! A single always-available stream, decoupled from the request/response
//! cycle. Publishing is fire-and-forget; active subscribers see every update
//! in order, and a subscriber that connects mid-operation can read the latest
//! value via [`ProgressChannel::latest`] but may have missed earlier updates.
//!
//! The channel is an explicitly constructed instance handed to the components
//! that publish or subscribe. There is no process-wide singleton.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use tokio::sync::broadcast;

/// Updates buffered per subscriber. A bulk operation emits one update per
/// item plus the terminal and idle emissions, so this comfortably covers a
/// subscriber that drains after the fact.
const CHANNEL_CAPACITY: usize = 64;

/// One progress emission.
///
/// `label: None` with `percent: 0` is the idle sentinel ("no operation in
/// progress"). A legitimate 0% update always carries a `Some` label, so the
/// two are distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub label: Option<String>,
    pub percent: u8,
}

impl ProgressUpdate {
    /// The "no operation in progress" sentinel.
    pub fn idle() -> Self {
        Self { label: None, percent: 0 }
    }

    pub fn is_idle(&self) -> bool {
        self.label.is_none() && self.percent == 0
    }
}

/// Publish/subscribe stream for progress updates.
#[derive(Clone)]
pub struct ProgressChannel {
    tx: broadcast::Sender<ProgressUpdate>,
    latest: Arc<RwLock<ProgressUpdate>>,
}

impl ProgressChannel {
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            tx,
            latest: Arc::new(RwLock::new(ProgressUpdate::idle())),
        }
    }

    /// Publishes a progress update to all subscribers. Never blocks and never
    /// fails; an update with no listeners is simply dropped.
    pub fn publish(&self, label: impl Into<String>, percent: u8) {
        self.send(ProgressUpdate {
            label: Some(label.into()),
            percent,
        });
    }

    /// Publishes the idle sentinel.
    pub fn clear(&self) {
        self.send(ProgressUpdate::idle());
    }

    /// Subscribes to future updates. Updates published before this call are
    /// not replayed; use [`latest`](Self::latest) for the current value.
    pub fn subscribe(&self) -> broadcast::Receiver<ProgressUpdate> {
        self.tx.subscribe()
    }

    /// Returns the most recently published update (the idle sentinel if
    /// nothing was ever published).
    pub fn latest(&self) -> ProgressUpdate {
        self.latest
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    fn send(&self, update: ProgressUpdate) {
        if let Ok(mut latest) = self.latest.write() {
            *latest = update.clone();
        }
        let _ = self.tx.send(update);
    }
}

impl Default for ProgressChannel {
    fn default() -> Self {
        Self::new()
    }
}
