//! In-memory remote for tests
//!
//! Rows live in insertion order behind a `RwLock`. Any operation can be
//! made to fail on demand, and every call that reaches the store is logged
//! with its payload so tests can compare what was sent across retries.

use std::collections::HashSet;
use std::sync::RwLock;

use async_trait::async_trait;
use treesync_core::{Forest, NodeRecord};

use crate::errors::{lock_poisoned, remote_unavailable, Result};
use crate::remote::RemoteStore;
use crate::repo::hydration::build_forest;

/// The four remote operations, for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteOp {
    CreateRoot,
    FetchAllRoots,
    ApplyCreateUpdateBatch,
    ApplyDeleteBatch,
}

impl RemoteOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteOp::CreateRoot => "create_root",
            RemoteOp::FetchAllRoots => "fetch_all_roots",
            RemoteOp::ApplyCreateUpdateBatch => "apply_create_update_batch",
            RemoteOp::ApplyDeleteBatch => "apply_delete_batch",
        }
    }
}

/// One call received by the store, failed or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    CreateRoot(NodeRecord),
    FetchAllRoots,
    ApplyCreateUpdateBatch {
        creates: Vec<NodeRecord>,
        updates: Vec<NodeRecord>,
    },
    ApplyDeleteBatch(Vec<String>),
}

#[derive(Default)]
pub struct InMemoryRemote {
    rows: RwLock<Vec<NodeRecord>>,
    failing: RwLock<HashSet<RemoteOp>>,
    calls: RwLock<Vec<RemoteCall>>,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with rows, as if persisted by an earlier sync
    pub fn with_rows(rows: Vec<NodeRecord>) -> Self {
        Self {
            rows: RwLock::new(rows),
            ..Self::default()
        }
    }

    /// Make every future call of `op` fail until `recover` is called
    pub fn fail_on(&self, op: RemoteOp) {
        if let Ok(mut failing) = self.failing.write() {
            failing.insert(op);
        }
    }

    pub fn recover(&self, op: RemoteOp) {
        if let Ok(mut failing) = self.failing.write() {
            failing.remove(&op);
        }
    }

    /// Snapshot of the stored rows in insertion order
    pub fn rows(&self) -> Vec<NodeRecord> {
        self.rows.read().map(|r| r.clone()).unwrap_or_default()
    }

    /// Every call received so far, in order
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.read().map(|c| c.clone()).unwrap_or_default()
    }

    fn receive(&self, op: RemoteOp, call: RemoteCall) -> Result<()> {
        self.calls
            .write()
            .map_err(|_| lock_poisoned(op.as_str()))?
            .push(call);

        let failing = self
            .failing
            .read()
            .map_err(|_| lock_poisoned(op.as_str()))?
            .contains(&op);
        if failing {
            return Err(remote_unavailable(op.as_str()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for InMemoryRemote {
    async fn create_root(&self, node: &NodeRecord) -> Result<()> {
        let op = RemoteOp::CreateRoot;
        self.receive(op, RemoteCall::CreateRoot(node.clone()))?;

        let mut rows = self.rows.write().map_err(|_| lock_poisoned(op.as_str()))?;
        upsert(&mut rows, node);
        Ok(())
    }

    async fn fetch_all_roots(&self) -> Result<Forest> {
        let op = RemoteOp::FetchAllRoots;
        self.receive(op, RemoteCall::FetchAllRoots)?;

        let rows = self.rows.read().map_err(|_| lock_poisoned(op.as_str()))?;
        Ok(build_forest(&rows))
    }

    async fn apply_create_update_batch(
        &self,
        creates: &[NodeRecord],
        updates: &[NodeRecord],
    ) -> Result<()> {
        let op = RemoteOp::ApplyCreateUpdateBatch;
        self.receive(
            op,
            RemoteCall::ApplyCreateUpdateBatch {
                creates: creates.to_vec(),
                updates: updates.to_vec(),
            },
        )?;

        let mut rows = self.rows.write().map_err(|_| lock_poisoned(op.as_str()))?;
        for create in creates {
            upsert(&mut rows, create);
        }
        for update in updates {
            if let Some(row) = rows.iter_mut().find(|r| r.id == update.id) {
                *row = update.clone();
            }
        }
        Ok(())
    }

    async fn apply_delete_batch(&self, ids: &[String]) -> Result<u64> {
        let op = RemoteOp::ApplyDeleteBatch;
        self.receive(op, RemoteCall::ApplyDeleteBatch(ids.to_vec()))?;

        let mut rows = self.rows.write().map_err(|_| lock_poisoned(op.as_str()))?;
        let before = rows.len();
        rows.retain(|r| !ids.contains(&r.id));
        Ok((before - rows.len()) as u64)
    }
}

/// Replace the row with the same id in place, or append
fn upsert(rows: &mut Vec<NodeRecord>, node: &NodeRecord) {
    match rows.iter_mut().find(|r| r.id == node.id) {
        Some(row) => *row = node.clone(),
        None => rows.push(node.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, parent: Option<&str>, data: Option<&str>) -> NodeRecord {
        NodeRecord {
            id: id.to_string(),
            parent_id: parent.map(str::to_string),
            name: id.to_uppercase(),
            data: data.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_batch_insert_update_and_delete() {
        let remote = InMemoryRemote::new();
        remote
            .apply_create_update_batch(
                &[record("r", None, None), record("c", Some("r"), Some("Data"))],
                &[],
            )
            .await
            .unwrap();

        remote
            .apply_create_update_batch(&[], &[record("c", Some("r"), Some("v"))])
            .await
            .unwrap();
        assert_eq!(remote.rows()[1].data.as_deref(), Some("v"));

        let deleted = remote
            .apply_delete_batch(&["c".to_string(), "missing".to_string()])
            .await
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(remote.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_injected_failure_changes_nothing() {
        let remote = InMemoryRemote::new();
        remote.fail_on(RemoteOp::ApplyCreateUpdateBatch);

        let err = remote
            .apply_create_update_batch(&[record("r", None, Some("Data"))], &[])
            .await
            .unwrap_err();
        assert_eq!(err.code(), "ERR_EXTERNAL_SERVICE");
        assert!(remote.rows().is_empty());
        assert_eq!(remote.calls().len(), 1);

        remote.recover(RemoteOp::ApplyCreateUpdateBatch);
        remote
            .apply_create_update_batch(&[record("r", None, Some("Data"))], &[])
            .await
            .unwrap();
        assert_eq!(remote.rows().len(), 1);
    }

    #[tokio::test]
    async fn test_resent_creates_replace_in_place() {
        let remote = InMemoryRemote::with_rows(vec![
            record("r", None, Some("old")),
            record("q", None, Some("Data")),
        ]);
        remote
            .apply_create_update_batch(
                &[record("a", None, Some("Data")), record("r", None, Some("new"))],
                &[],
            )
            .await
            .unwrap();

        let ids: Vec<String> = remote.rows().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["r", "q", "a"]);
        assert_eq!(remote.rows()[0].data.as_deref(), Some("new"));
    }
}
