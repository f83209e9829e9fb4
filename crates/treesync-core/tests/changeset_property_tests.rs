//! Randomized edit sequences against a synced starting forest.

mod common;

use proptest::prelude::*;
use treesync_core::rules::{validate_changeset, validate_forest};
use treesync_core::{EditSession, TreeSyncError};

#[derive(Debug, Clone)]
enum Edit {
    CreateRoot,
    AddChild(usize),
    Delete(usize),
    Rename(usize, String),
    SetData(usize, String),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        Just(Edit::CreateRoot),
        any::<usize>().prop_map(Edit::AddChild),
        any::<usize>().prop_map(Edit::Delete),
        (any::<usize>(), "[a-z]{1,8}").prop_map(|(i, s)| Edit::Rename(i, s)),
        (any::<usize>(), "[a-z]{1,8}").prop_map(|(i, s)| Edit::SetData(i, s)),
    ]
}

fn pick(session: &EditSession, index: usize) -> Option<String> {
    let ids = session.forest().all_ids();
    if ids.is_empty() {
        None
    } else {
        Some(ids[index % ids.len()].clone())
    }
}

/// Delete addressed the way callers do: by parent, or by itself for a root
fn delete(session: &mut EditSession, id: &str) {
    let parent = session
        .forest()
        .parent_id_of(id)
        .unwrap()
        .unwrap_or_else(|| id.to_string());
    session.delete_node(&parent, id).unwrap();
}

fn run(session: &mut EditSession, edit: &Edit) {
    match edit {
        Edit::CreateRoot => {
            session.create_root("R");
        }
        Edit::AddChild(i) => {
            if let Some(id) = pick(session, *i) {
                session.add_child(&id).unwrap();
            }
        }
        Edit::Delete(i) => {
            if let Some(id) = pick(session, *i) {
                delete(session, &id);
            }
        }
        Edit::Rename(i, name) => {
            if let Some(id) = pick(session, *i) {
                session.rename_node(&id, name.clone()).unwrap();
            }
        }
        Edit::SetData(i, value) => {
            if let Some(id) = pick(session, *i) {
                let is_branch = session.forest().get_node(&id).unwrap().is_branch();
                let before = session.clone();
                let result = session.set_leaf_data(&id, value.clone());
                if is_branch {
                    assert!(matches!(result, Err(TreeSyncError::NotALeaf { .. })));
                    assert_eq!(*session, before);
                } else {
                    assert!(result.is_ok());
                }
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_invariants_hold_after_every_edit(edits in prop::collection::vec(edit_strategy(), 0..40)) {
        let mut session = common::synced_session();
        for edit in &edits {
            run(&mut session, edit);
            prop_assert!(validate_forest(session.forest()).is_ok());
            prop_assert!(validate_changeset(session.forest(), session.changes()).is_ok());
        }
    }

    #[test]
    fn prop_create_then_delete_root_is_a_no_op(edits in prop::collection::vec(edit_strategy(), 0..25)) {
        let mut session = common::synced_session();
        for edit in &edits {
            run(&mut session, edit);
        }
        let before = session.changes().clone();

        let root = session.create_root("Temp");
        session.add_child(&root).unwrap();
        session.delete_node(&root, &root).unwrap();

        prop_assert_eq!(session.changes(), &before);
    }

    #[test]
    fn prop_delete_removes_whole_subtree(
        edits in prop::collection::vec(edit_strategy(), 0..25),
        target in any::<usize>(),
    ) {
        let mut session = common::synced_session();
        for edit in &edits {
            run(&mut session, edit);
        }
        let Some(id) = pick(&session, target) else {
            return Ok(());
        };

        let subtree = session.forest().collect_subtree_ids(&id).unwrap();
        let unsynced: Vec<bool> = subtree
            .iter()
            .map(|s| session.changes().is_pending_create(s))
            .collect();
        let count_before = session.forest().node_count();

        delete(&mut session, &id);

        prop_assert_eq!(session.forest().node_count(), count_before - subtree.len());
        for (removed, was_unsynced) in subtree.iter().zip(unsynced) {
            prop_assert!(!session.forest().contains(removed));
            prop_assert!(!session.changes().is_pending_create(removed));
            prop_assert!(session.changes().pending_update(removed).is_none());
            prop_assert_eq!(session.changes().is_pending_delete(removed), !was_unsynced);
        }
    }

    #[test]
    fn prop_replaying_edits_is_deterministic(edits in prop::collection::vec(edit_strategy(), 0..30)) {
        // CreateRoot mints fresh ids, so compare bucket shapes rather than ids
        let shape = |session: &EditSession| {
            (
                session.changes().creates().len(),
                session.changes().updates().len(),
                session.changes().deletes().len(),
                session.forest().node_count(),
            )
        };

        let mut first = common::synced_session();
        let mut second = common::synced_session();
        for edit in &edits {
            run(&mut first, edit);
            run(&mut second, edit);
        }
        prop_assert_eq!(shape(&first), shape(&second));
    }
}
