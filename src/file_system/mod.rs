//! Filesystem layer: enumeration, watching, and bulk write operations.

pub mod listing;
pub mod operations;
pub mod validation;
pub mod watcher;
pub mod write_operations;
