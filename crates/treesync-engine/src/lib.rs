//! TreeSync Engine - Orchestration layer
//!
//! Coordinates an edit session with a remote store: loading the forest,
//! publishing roots eagerly, and the two-phase export of pending changes.

pub mod reconciler;

pub use reconciler::{bootstrap, export_batch, publish_root, sync, ExportBatch, SyncReport};
