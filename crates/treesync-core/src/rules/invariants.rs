use std::collections::HashSet;

use crate::changeset::{ChangeSet, NodeRecord};
use crate::model::TreeNode;
use crate::ops::Forest;

/// Find ids that occur more than once in the forest
pub fn find_duplicate_ids(forest: &Forest) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for id in forest.all_ids() {
        if !seen.insert(id.clone()) && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }
    duplicates
}

/// Find branches left with no children
///
/// A branch must hold at least one child; the last detach demotes it.
pub fn find_empty_branches(forest: &Forest) -> Vec<String> {
    let mut empty = Vec::new();
    for root in forest.roots() {
        collect_empty_branches(root, &mut empty);
    }
    empty
}

fn collect_empty_branches(node: &TreeNode, empty: &mut Vec<String>) {
    if node.is_branch() && node.children().is_empty() {
        empty.push(node.id.clone());
    }
    for child in node.children() {
        collect_empty_branches(child, empty);
    }
}

/// Find pending deletes whose id is still in the forest
pub fn find_deletes_still_in_forest(forest: &Forest, changes: &ChangeSet) -> Vec<String> {
    changes
        .deletes()
        .iter()
        .filter(|d| forest.contains(&d.id))
        .map(|d| d.id.clone())
        .collect()
}

/// Find pending deletes that also have a create or update entry
pub fn find_deletes_also_pending(changes: &ChangeSet) -> Vec<String> {
    changes
        .deletes()
        .iter()
        .filter(|d| changes.is_pending_create(&d.id) || changes.pending_update(&d.id).is_some())
        .map(|d| d.id.clone())
        .collect()
}

/// Find ids with both a create and an update entry
pub fn find_created_and_updated(changes: &ChangeSet) -> Vec<String> {
    changes
        .updates()
        .iter()
        .filter(|u| changes.is_pending_create(&u.id))
        .map(|u| u.id.clone())
        .collect()
}

/// Find create/update entries that no longer describe the forest
///
/// An entry is stale when its node is gone, or when its name, parent or
/// data disagree with the node's current state. Data must be present
/// exactly when the node is a leaf.
///
/// Returns list of (node_id, reason) tuples
pub fn find_stale_entries(forest: &Forest, changes: &ChangeSet) -> Vec<(String, String)> {
    changes
        .creates()
        .iter()
        .chain(changes.updates())
        .filter_map(|entry| stale_reason(forest, entry).map(|reason| (entry.id.clone(), reason)))
        .collect()
}

fn stale_reason(forest: &Forest, entry: &NodeRecord) -> Option<String> {
    let Some(node) = forest.find(&entry.id) else {
        return Some("node is not in the forest".to_string());
    };
    if node.name != entry.name {
        return Some(format!("name '{}' != '{}'", entry.name, node.name));
    }
    let parent = forest.parent_id_of(&entry.id).ok().flatten();
    if parent != entry.parent_id {
        return Some("parentId does not match".to_string());
    }
    if entry.data.as_deref() != node.data() {
        return Some(if node.is_leaf() {
            "leaf entry does not carry its current data".to_string()
        } else {
            "branch entry carries data".to_string()
        });
    }
    None
}
