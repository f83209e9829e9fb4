//! SQLite-backed remote store

#![allow(clippy::result_large_err)]

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use rusqlite::Connection;
use treesync_core::{Forest, NodeRecord};

use crate::db;
use crate::errors::{from_rusqlite, lock_poisoned, Result};
use crate::migrations::apply_migrations;
use crate::remote::RemoteStore;
use crate::repo::hydration::build_forest;
use crate::repo::NodeRepo;

/// Remote store keeping node rows in one SQLite database
///
/// The connection sits behind a `Mutex`; each batch runs in its own
/// transaction so a failed batch leaves no partial rows. Creates are keyed
/// by id, so replaying a batch after a partial sync converges.
pub struct SqliteRemote {
    conn: Mutex<Connection>,
}

impl SqliteRemote {
    /// Open (or create) the database file and bring its schema up to date
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = db::open(path)?;
        db::configure(&conn)?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(db::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        apply_migrations(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Number of stored rows
    pub fn node_count(&self) -> Result<u64> {
        NodeRepo::count(&*self.lock("node_count")?)
    }

    /// Stored rows in insertion order
    pub fn rows(&self) -> Result<Vec<NodeRecord>> {
        NodeRepo::load_all(&*self.lock("rows")?)
    }

    fn lock(&self, op: &str) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| lock_poisoned(op))
    }
}

#[async_trait]
impl RemoteStore for SqliteRemote {
    async fn create_root(&self, node: &NodeRecord) -> Result<()> {
        let mut conn = self.lock("create_root")?;
        let tx = conn.transaction().map_err(from_rusqlite)?;
        NodeRepo::upsert_tx(&tx, node)?;
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(node_id = %node.id, "root persisted");
        Ok(())
    }

    async fn fetch_all_roots(&self) -> Result<Forest> {
        let rows = NodeRepo::load_all(&*self.lock("fetch_all_roots")?)?;
        Ok(build_forest(&rows))
    }

    async fn apply_create_update_batch(
        &self,
        creates: &[NodeRecord],
        updates: &[NodeRecord],
    ) -> Result<()> {
        let mut conn = self.lock("apply_create_update_batch")?;
        let tx = conn.transaction().map_err(from_rusqlite)?;

        for node in creates {
            NodeRepo::upsert_tx(&tx, node)?;
        }
        let mut matched = 0usize;
        for node in updates {
            if NodeRepo::update_tx(&tx, node)? {
                matched += 1;
            }
        }
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(
            creates = creates.len(),
            updates = updates.len(),
            matched,
            "create/update batch committed"
        );
        Ok(())
    }

    async fn apply_delete_batch(&self, ids: &[String]) -> Result<u64> {
        let mut conn = self.lock("apply_delete_batch")?;
        let tx = conn.transaction().map_err(from_rusqlite)?;

        let mut removed = 0;
        for id in ids {
            removed += NodeRepo::delete_tx(&tx, id)?;
        }
        tx.commit().map_err(from_rusqlite)?;

        tracing::debug!(requested = ids.len(), removed, "delete batch committed");
        Ok(removed)
    }
}
