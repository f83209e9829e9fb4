use serde::{Deserialize, Serialize};

use crate::model::TreeNode;

/// Wire record for a pending create or update
///
/// `data` is absent for branches; on an update that means the remote side
/// clears whatever data it held for the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
}

impl NodeRecord {
    /// Snapshot a node's current state
    pub fn from_node(node: &TreeNode, parent_id: Option<String>) -> Self {
        Self {
            id: node.id.clone(),
            parent_id,
            name: node.name.clone(),
            data: node.data().map(str::to_string),
        }
    }
}

/// Wire record for a pending delete
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DeleteRecord {
    pub id: String,
}

/// The three pending buckets, each in insertion order
///
/// Insertion order matters for creates: a parent is always queued before
/// the children created under it, so a remote can insert them in sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSet {
    #[serde(rename = "add")]
    pub(super) creates: Vec<NodeRecord>,
    #[serde(rename = "update")]
    pub(super) updates: Vec<NodeRecord>,
    #[serde(rename = "delete")]
    pub(super) deletes: Vec<DeleteRecord>,
    /// Pending creates the remote already stored in an earlier, partially
    /// failed sync; deleting one of them must reach the remote
    #[serde(skip)]
    pub(super) persisted: Vec<String>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn creates(&self) -> &[NodeRecord] {
        &self.creates
    }

    pub fn updates(&self) -> &[NodeRecord] {
        &self.updates
    }

    pub fn deletes(&self) -> &[DeleteRecord] {
        &self.deletes
    }

    pub fn is_empty(&self) -> bool {
        self.creates.is_empty() && self.updates.is_empty() && self.deletes.is_empty()
    }

    pub fn pending_create(&self, id: &str) -> Option<&NodeRecord> {
        self.creates.iter().find(|r| r.id == id)
    }

    pub fn pending_update(&self, id: &str) -> Option<&NodeRecord> {
        self.updates.iter().find(|r| r.id == id)
    }

    pub fn is_pending_create(&self, id: &str) -> bool {
        self.pending_create(id).is_some()
    }

    pub fn is_pending_delete(&self, id: &str) -> bool {
        self.deletes.iter().any(|r| r.id == id)
    }

    /// True if a create/update batch carrying this id was acknowledged
    /// since the last full sync
    pub fn is_persisted(&self, id: &str) -> bool {
        self.persisted.iter().any(|p| p == id)
    }

    /// True if the id appears in any bucket
    pub fn tracks(&self, id: &str) -> bool {
        self.is_pending_create(id) || self.pending_update(id).is_some() || self.is_pending_delete(id)
    }

    /// Fold one event into the buckets in place
    pub fn apply_event(&mut self, event: &super::ChangeEvent) {
        *self = super::reduce(std::mem::take(self), event);
    }

    pub(super) fn create_entry_mut(&mut self, id: &str) -> Option<&mut NodeRecord> {
        self.creates.iter_mut().find(|r| r.id == id)
    }

    pub(super) fn update_entry_mut(&mut self, id: &str) -> Option<&mut NodeRecord> {
        self.updates.iter_mut().find(|r| r.id == id)
    }
}
