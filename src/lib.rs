//! File-operation and synchronization engine for a dual-pane file manager.
//!
//! The engine owns everything below the UI: directory enumeration, per-pane
//! filesystem watches, bulk copy/move/delete with streaming progress, pane
//! navigation state, and persisted settings. The UI talks to it through
//! tagged JSON messages ([`Request`] in, [`Response`] out) over whatever
//! transport the host application provides.
//!
//! ```no_run
//! use commandman_engine::{Engine, EngineConfig, PaneId, Request};
//!
//! # async fn run() {
//! let (engine, mut responses) = Engine::new(EngineConfig::default());
//! engine
//!     .handle_request(Request::ListDirectory {
//!         path: Some("/home".to_string()),
//!         pane_id: Some(PaneId::Left),
//!     })
//!     .await;
//! let listing = responses.recv().await;
//! # }
//! ```

pub mod bridge;
pub mod dispatcher;
pub mod drives;
pub mod error;
pub mod file_system;
mod ignore_poison;
pub mod panes;
pub mod progress;
pub mod settings;

pub use bridge::{AppInfo, PaneId, Request, Response};
pub use dispatcher::{Engine, EngineConfig};
pub use error::EngineError;
pub use file_system::listing::DirectoryEntry;
pub use file_system::write_operations::{OperationKind, OperationStatus};
pub use progress::{ProgressChannel, ProgressUpdate};
pub use settings::AppState;
