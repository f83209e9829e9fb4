use serde::Serialize;
use treesync_core::render::{render, RenderMode};
use treesync_core::rules::validate_changeset;
use treesync_core::{ChangeSet, DeleteRecord, Forest, NodeRecord, Result};

/// Body of the create/update phase
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CreateUpdatePayload {
    pub add: Vec<NodeRecord>,
    pub update: Vec<NodeRecord>,
}

impl CreateUpdatePayload {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.update.is_empty()
    }
}

/// Everything one export attempt sends, plus the snapshot shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportBatch {
    /// Id-stripped rendering of the forest
    pub snapshot: String,
    pub create_update: CreateUpdatePayload,
    pub delete: Vec<DeleteRecord>,
}

impl ExportBatch {
    /// True when neither phase has anything to send
    pub fn is_empty(&self) -> bool {
        self.create_update.is_empty() && self.delete.is_empty()
    }

    pub fn delete_ids(&self) -> Vec<String> {
        self.delete.iter().map(|d| d.id.clone()).collect()
    }
}

/// Build the payloads for one export attempt
///
/// Pure: reads the forest and change-set, mutates neither.
///
/// # Errors
/// * `InvariantViolation` - If the change-set does not describe the forest
/// * `Serialization` - If the snapshot cannot be rendered
pub fn export_batch(forest: &Forest, changes: &ChangeSet, mode: RenderMode) -> Result<ExportBatch> {
    validate_changeset(forest, changes)?;

    Ok(ExportBatch {
        snapshot: render(forest, mode)?,
        create_update: CreateUpdatePayload {
            add: changes.creates().to_vec(),
            update: changes.updates().to_vec(),
        },
        delete: changes.deletes().to_vec(),
    })
}
