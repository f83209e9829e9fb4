//! Change-set tracking
//!
//! The net difference between the local forest and the remote store, kept
//! as three buckets (creates, updates, deletes) and advanced only by the
//! pure `reduce` function over explicit `ChangeEvent`s.

pub mod event;
pub mod record;
pub mod tracker;

pub use event::ChangeEvent;
pub use record::{ChangeSet, DeleteRecord, NodeRecord};
pub use tracker::reduce;
