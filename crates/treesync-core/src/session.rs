//! Edit session
//!
//! `EditSession` owns one forest and the change-set describing how it
//! differs from the remote. Every mutation goes through a session method,
//! which mutates the forest first and then folds the matching
//! `ChangeEvent` into the change-set, so the tracker never misses an edit.

use crate::changeset::{ChangeEvent, ChangeSet, NodeRecord};
use crate::errors::Result;
use crate::ops::{node_ops, Forest, Removal};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditSession {
    forest: Forest,
    changes: ChangeSet,
}

impl EditSession {
    /// Empty forest, nothing pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a forest that mirrors the remote, nothing pending
    pub fn from_forest(forest: Forest) -> Self {
        Self {
            forest,
            changes: ChangeSet::default(),
        }
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    pub fn changes(&self) -> &ChangeSet {
        &self.changes
    }

    pub fn has_pending_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn into_parts(self) -> (Forest, ChangeSet) {
        (self.forest, self.changes)
    }

    /// Append a new root leaf and queue it for creation
    pub fn create_root(&mut self, name: impl Into<String>) -> String {
        let id = node_ops::create_root(&mut self.forest, name.into());
        // The node was just pushed, so the lookup cannot miss
        if let Ok(node) = self.record_for(&id) {
            self.record(ChangeEvent::Created {
                node,
                promoted_parent: None,
            });
        }
        id
    }

    /// Append a default child leaf under `parent_id`
    ///
    /// # Errors
    /// * `NodeNotFound` - If the parent doesn't exist
    pub fn add_child(&mut self, parent_id: &str) -> Result<String> {
        let was_leaf = self.forest.get_node(parent_id)?.is_leaf();
        let id = node_ops::add_child(&mut self.forest, parent_id)?;

        let node = self.record_for(&id)?;
        let promoted_parent = if was_leaf {
            Some(self.record_for(parent_id)?)
        } else {
            None
        };
        self.record(ChangeEvent::Created {
            node,
            promoted_parent,
        });
        Ok(id)
    }

    /// Delete `child_id` and its subtree; `parent_id == child_id` deletes a root
    ///
    /// # Errors
    /// * `RootNotFound` - If a root delete names an id that is not a root
    /// * `NodeNotFound` - If the parent doesn't exist
    /// * `ChildNotFound` - If the child is not a direct child of the parent
    pub fn delete_node(&mut self, parent_id: &str, child_id: &str) -> Result<Removal> {
        let removal = node_ops::delete_node(&mut self.forest, parent_id, child_id)?;

        let demoted_parent = match &removal.demoted_parent {
            Some(parent) => Some(self.record_for(parent)?),
            None => None,
        };
        self.record(ChangeEvent::Deleted {
            target_id: removal.target_id.clone(),
            removed_ids: removal.removed_ids.clone(),
            demoted_parent,
        });
        Ok(removal)
    }

    /// # Errors
    /// * `NodeNotFound` - If the node doesn't exist
    pub fn rename_node(&mut self, id: &str, name: impl Into<String>) -> Result<()> {
        node_ops::rename_node(&mut self.forest, id, name.into())?;
        let node = self.record_for(id)?;
        self.record(ChangeEvent::Renamed { node });
        Ok(())
    }

    /// # Errors
    /// * `NodeNotFound` - If the node doesn't exist
    /// * `NotALeaf` - If the node is a branch
    pub fn set_leaf_data(&mut self, id: &str, value: impl Into<String>) -> Result<()> {
        node_ops::set_leaf_data(&mut self.forest, id, value.into())?;
        let node = self.record_for(id)?;
        self.record(ChangeEvent::DataEdited { node });
        Ok(())
    }

    /// Mark nodes as persisted remotely outside of a batch sync
    pub fn acknowledge(&mut self, ids: Vec<String>) {
        self.record(ChangeEvent::Acknowledged { ids });
    }

    /// Note that the remote stored these pending creates while the sync as a
    /// whole has not finished; the entries stay queued for a retry
    pub fn mark_persisted(&mut self, ids: Vec<String>) {
        self.record(ChangeEvent::Persisted { ids });
    }

    /// Drop every pending entry; called once both sync phases succeeded
    pub fn clear_changes(&mut self) {
        self.changes = ChangeSet::default();
    }

    fn record_for(&self, id: &str) -> Result<NodeRecord> {
        let node = self.forest.get_node(id)?;
        let parent_id = self.forest.parent_id_of(id)?;
        Ok(NodeRecord::from_node(node, parent_id))
    }

    fn record(&mut self, event: ChangeEvent) {
        tracing::debug!(?event, "change recorded");
        self.changes.apply_event(&event);
    }
}
