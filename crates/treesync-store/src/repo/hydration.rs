//! Hydration layer - rebuilds the forest from flat node rows
//!
//! Rows are taken in insertion order, which is also sibling order.

use std::collections::{HashMap, HashSet};

use treesync_core::model::{NodeContent, TreeNode, DEFAULT_DATA};
use treesync_core::{Forest, NodeRecord};

/// Build a forest from flat rows
///
/// Rows without a parent become roots. A row with children becomes a branch
/// (any stored data is ignored); a row without children becomes a leaf,
/// falling back to the default data when none is stored. Rows whose parent
/// is not among the rows are skipped with a warning.
pub fn build_forest(rows: &[NodeRecord]) -> Forest {
    let known: HashSet<&str> = rows.iter().map(|r| r.id.as_str()).collect();

    let mut roots = Vec::new();
    let mut children_of: HashMap<&str, Vec<&NodeRecord>> = HashMap::new();
    for row in rows {
        match row.parent_id.as_deref() {
            None => roots.push(row),
            Some(parent) if known.contains(parent) => {
                children_of.entry(parent).or_default().push(row)
            }
            Some(parent) => {
                tracing::warn!(node_id = %row.id, parent_id = %parent, "skipping row with missing parent");
            }
        }
    }

    Forest::from_roots(
        roots
            .into_iter()
            .map(|row| build_node(row, &children_of))
            .collect(),
    )
}

fn build_node(row: &NodeRecord, children_of: &HashMap<&str, Vec<&NodeRecord>>) -> TreeNode {
    let content = match children_of.get(row.id.as_str()) {
        Some(children) => NodeContent::Branch {
            children: children
                .iter()
                .map(|child| build_node(child, children_of))
                .collect(),
        },
        None => NodeContent::Leaf {
            data: row.data.clone().unwrap_or_else(|| DEFAULT_DATA.to_string()),
        },
    };

    TreeNode {
        id: row.id.clone(),
        name: row.name.clone(),
        content,
    }
}

/// Flatten a forest into rows, parents before children
pub fn flatten_forest(forest: &Forest) -> Vec<NodeRecord> {
    let mut rows = Vec::new();
    for root in forest.roots() {
        flatten_node(root, None, &mut rows);
    }
    rows
}

fn flatten_node(node: &TreeNode, parent_id: Option<&str>, rows: &mut Vec<NodeRecord>) {
    rows.push(NodeRecord::from_node(node, parent_id.map(str::to_string)));
    for child in node.children() {
        flatten_node(child, Some(&node.id), rows);
    }
}
