//! The persistence collaborator a sync talks to.
//!
//! Implementations:
//! - `InMemoryRemote` - For testing, with failure injection
//! - `SqliteRemote` - Rows in a local SQLite file

use async_trait::async_trait;
use treesync_core::{Forest, NodeRecord};

use crate::errors::Result;

/// Remote store holding the persisted forest as flat node rows.
///
/// Implementations must be `Send + Sync` so a session can sync from any
/// task. Each batch method is all-or-nothing: on `Err` nothing from the
/// batch was persisted.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Persist one new root-level node (replacing a row with the same id)
    async fn create_root(&self, node: &NodeRecord) -> Result<()>;

    /// Load the full persisted forest
    async fn fetch_all_roots(&self) -> Result<Forest>;

    /// Insert `creates` in order, then overwrite `updates` by id
    ///
    /// A create naming a stored id replaces that row in place, so a batch
    /// resent after a failed delete phase succeeds. An update with
    /// `data: None` clears the stored data; updates naming an unknown id
    /// are ignored.
    async fn apply_create_update_batch(
        &self,
        creates: &[NodeRecord],
        updates: &[NodeRecord],
    ) -> Result<()>;

    /// Remove the given ids, returning how many rows existed
    async fn apply_delete_batch(&self, ids: &[String]) -> Result<u64>;
}
