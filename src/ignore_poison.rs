//! Extension trait to ignore mutex poisoning.
//!
//! The engine's mutexes guard simple value stores (pane snapshots, operation
//! status), where a panic on another thread doesn't invalidate the data. This
//! trait replaces the `.lock().unwrap_or_else(|e| e.into_inner())` boilerplate
//! with a readable call.

use std::sync::{Mutex, MutexGuard};

pub trait IgnorePoison<T> {
    /// Locks the mutex, ignoring poison.
    fn lock_ignore_poison(&self) -> MutexGuard<'_, T>;
}

impl<T> IgnorePoison<T> for Mutex<T> {
    fn lock_ignore_poison(&self) -> MutexGuard<'_, T> {
        self.lock().unwrap_or_else(|e| e.into_inner())
    }
}
