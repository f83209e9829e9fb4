//! TreeSync Core - in-memory tree editing with net-change tracking
//!
//! This crate provides:
//! - The branch-or-leaf node model and the multi-root forest
//! - Primitive node operations (add, delete, rename, set data)
//! - The change-set tracker: a pure reducer keeping pending creates,
//!   updates and deletes minimal as edits pile up
//! - `EditSession`, the single owner of a forest and its change-set, plus
//!   the `Command` inventory and `apply()` boundary
//! - Invariant checks and id-stripped snapshot rendering
//! - The error and logging facilities shared by every crate

pub mod apply;
pub mod changeset;
pub mod commands;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod ops;
pub mod render;
pub mod rules;
pub mod session;

// Logging macros reference the schema constants through this path
pub use treesync_core_types;

// Re-export commonly used types
pub use apply::apply;
pub use changeset::{ChangeEvent, ChangeSet, DeleteRecord, NodeRecord};
pub use commands::Command;
pub use errors::{ExError, ExErrorKind, Result, SyncPhase, TreeSyncError};
pub use model::{NodeContent, TreeNode};
pub use ops::{Forest, Removal};
pub use render::RenderMode;
pub use session::EditSession;
