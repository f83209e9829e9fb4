use serde::{Deserialize, Serialize};

use crate::errors::{Result, TreeSyncError};
use crate::model::{NodeContent, TreeNode};

/// The ordered list of root nodes and everything under them
///
/// Roots are positional: a node is a root because it sits in `roots`.
/// Lookups walk the tree recursively; there is no side index, so ids are
/// only as unique as the producers make them (`validate_forest` verifies).
/// Not thread-safe; owned by exactly one editing session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<TreeNode>,
}

impl Forest {
    pub fn new() -> Self {
        Self { roots: Vec::new() }
    }

    /// Wrap already-built roots (e.g. hydrated from a remote store)
    pub fn from_roots(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[TreeNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Find a node anywhere in the forest
    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        find_in(&self.roots, id)
    }

    pub(crate) fn find_mut(&mut self, id: &str) -> Option<&mut TreeNode> {
        find_in_mut(&mut self.roots, id)
    }

    /// Get a node by ID
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if no node carries this id.
    pub fn get_node(&self, id: &str) -> Result<&TreeNode> {
        self.find(id).ok_or_else(|| TreeSyncError::NodeNotFound {
            node_id: id.to_string(),
        })
    }

    /// Get a mutable reference to a node by ID
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if no node carries this id.
    pub(crate) fn get_node_mut(&mut self, id: &str) -> Result<&mut TreeNode> {
        self.find_mut(id).ok_or_else(|| TreeSyncError::NodeNotFound {
            node_id: id.to_string(),
        })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn is_root(&self, id: &str) -> bool {
        self.roots.iter().any(|r| r.id == id)
    }

    /// Id of the node's parent; `Ok(None)` for a root
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the node is not in the forest.
    pub fn parent_id_of(&self, id: &str) -> Result<Option<String>> {
        if self.is_root(id) {
            return Ok(None);
        }
        parent_in(&self.roots, id)
            .map(|parent| Some(parent.id.clone()))
            .ok_or_else(|| TreeSyncError::NodeNotFound {
                node_id: id.to_string(),
            })
    }

    /// Pre-order ids of a node and all of its descendants
    ///
    /// # Errors
    ///
    /// Returns `NodeNotFound` if the node is not in the forest.
    pub fn collect_subtree_ids(&self, id: &str) -> Result<Vec<String>> {
        Ok(self.get_node(id)?.subtree_ids())
    }

    /// Every id in the forest, pre-order, roots in order
    pub fn all_ids(&self) -> Vec<String> {
        self.roots.iter().flat_map(TreeNode::subtree_ids).collect()
    }

    pub fn node_count(&self) -> usize {
        self.roots.iter().map(|r| r.subtree_ids().len()).sum()
    }

    /// Deepest root-to-leaf level count; 0 for an empty forest
    pub fn depth(&self) -> usize {
        self.roots.iter().map(TreeNode::depth).max().unwrap_or(0)
    }

    /// Resolve a 0-based index path from the roots (`[0, 2]` is the third
    /// child of the first root)
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` for an empty path or an index out of range.
    pub fn resolve_path(&self, path: &[usize]) -> Result<&TreeNode> {
        let invalid = || TreeSyncError::InvalidPath {
            path: format_path(path),
        };

        let (first, rest) = path.split_first().ok_or_else(invalid)?;
        let mut node = self.roots.get(*first).ok_or_else(invalid)?;
        for index in rest {
            node = node.children().get(*index).ok_or_else(invalid)?;
        }
        Ok(node)
    }

    pub(crate) fn push_root(&mut self, node: TreeNode) {
        self.roots.push(node);
    }

    pub(crate) fn remove_root(&mut self, id: &str) -> Option<TreeNode> {
        let position = self.roots.iter().position(|r| r.id == id)?;
        Some(self.roots.remove(position))
    }
}

/// Render an index path the way the CLI accepts it (`0/2/1`)
pub fn format_path(path: &[usize]) -> String {
    path.iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn find_in<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.id == id {
            return Some(node);
        }
        if let Some(found) = find_in(node.children(), id) {
            return Some(found);
        }
    }
    None
}

fn find_in_mut<'a>(nodes: &'a mut [TreeNode], id: &str) -> Option<&'a mut TreeNode> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let NodeContent::Branch { children } = &mut node.content {
            if let Some(found) = find_in_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn parent_in<'a>(nodes: &'a [TreeNode], id: &str) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.children().iter().any(|c| c.id == id) {
            return Some(node);
        }
        if let Some(found) = parent_in(node.children(), id) {
            return Some(found);
        }
    }
    None
}
