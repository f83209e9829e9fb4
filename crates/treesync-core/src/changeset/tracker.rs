use super::event::ChangeEvent;
use super::record::{ChangeSet, DeleteRecord, NodeRecord};

/// Fold one event into the change-set
///
/// Pure and deterministic: the same start state and event sequence always
/// produce identical buckets.
///
/// A node counts as synced when it has no PendingCreate entry. Edits to an
/// unsynced node fold into its create entry; edits to a synced node upsert a
/// single update entry. A pending create the remote already stored
/// (`Persisted`) still folds edits, but deleting it queues a delete.
pub fn reduce(mut state: ChangeSet, event: &ChangeEvent) -> ChangeSet {
    match event {
        ChangeEvent::Created {
            node,
            promoted_parent,
        } => {
            if !state.is_pending_create(&node.id) {
                state.creates.push(node.clone());
            }
            if let Some(parent) = promoted_parent {
                track_variant_change(&mut state, parent);
            }
        }

        ChangeEvent::Renamed { node } => {
            if let Some(entry) = state.create_entry_mut(&node.id) {
                entry.name = node.name.clone();
            } else if let Some(entry) = state.update_entry_mut(&node.id) {
                entry.name = node.name.clone();
            } else {
                state.updates.push(node.clone());
            }
        }

        ChangeEvent::DataEdited { node } => {
            if let Some(entry) = state.create_entry_mut(&node.id) {
                entry.data = node.data.clone();
            } else if let Some(entry) = state.update_entry_mut(&node.id) {
                entry.data = node.data.clone();
            } else {
                state.updates.push(node.clone());
            }
        }

        ChangeEvent::Deleted {
            removed_ids,
            demoted_parent,
            ..
        } => {
            for id in removed_ids {
                state.updates.retain(|r| &r.id != id);
                let local_only = state.is_pending_create(id) && !state.is_persisted(id);
                state.creates.retain(|r| &r.id != id);
                state.persisted.retain(|p| p != id);
                if !local_only && !state.is_pending_delete(id) {
                    state.deletes.push(DeleteRecord { id: id.clone() });
                }
            }
            if let Some(parent) = demoted_parent {
                track_variant_change(&mut state, parent);
            }
        }

        ChangeEvent::Persisted { ids } => {
            for id in ids {
                if state.is_pending_create(id) && !state.is_persisted(id) {
                    state.persisted.push(id.clone());
                }
            }
        }

        ChangeEvent::Acknowledged { ids } => {
            state.creates.retain(|r| !ids.contains(&r.id));
            state.updates.retain(|r| !ids.contains(&r.id));
            state.persisted.retain(|p| !ids.contains(p));
        }
    }
    state
}

/// Bring the pending entry for a promoted or demoted node in line with its
/// new variant; a synced node without an entry gets a fresh update.
fn track_variant_change(state: &mut ChangeSet, record: &NodeRecord) {
    if let Some(entry) = state.create_entry_mut(&record.id) {
        entry.data = record.data.clone();
    } else if let Some(entry) = state.update_entry_mut(&record.id) {
        entry.data = record.data.clone();
    } else {
        state.updates.push(record.clone());
    }
}
