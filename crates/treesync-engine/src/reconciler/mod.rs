//! Reconciliation between a local session and a remote store.
//!
//! ## Sync pipeline (in order):
//! 1. Build the export batch and validate invariants (no network on failure)
//! 2. Create/update phase, skipped when there is nothing to send
//! 3. Delete phase, only after the create/update phase was acknowledged
//! 4. Clear the change-set
//!
//! A failure in step 2 or 3 leaves the change-set untouched, so the next
//! attempt sends exactly the same payloads.

pub mod batch;
pub mod sync;

pub use batch::{export_batch, CreateUpdatePayload, ExportBatch};
pub use sync::{bootstrap, publish_root, sync, SyncReport};
