use serde::{Deserialize, Serialize};

/// Data installed on every new leaf and on a branch demoted to a leaf
pub const DEFAULT_DATA: &str = "Data";

/// Name given to a child created through `add_child`
pub const DEFAULT_CHILD_NAME: &str = "New Child";

/// Name used by front ends that create roots without asking for a name
pub const DEFAULT_ROOT_NAME: &str = "New Root";

/// What a node holds: ordered children or a scalar value, never both
///
/// Serialized untagged so a node reads as `{"children": [...]}` or
/// `{"data": "..."}` next to its other fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeContent {
    Branch { children: Vec<TreeNode> },
    Leaf { data: String },
}

/// A named node of the forest
///
/// Each node exclusively owns its children, so the forest is a strict tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    /// Unique identifier (UUID v7), assigned at creation and never changed
    pub id: String,

    /// Human-readable label
    pub name: String,

    #[serde(flatten)]
    pub content: NodeContent,
}

impl TreeNode {
    /// Create a leaf holding the default data
    pub fn new_leaf(id: String, name: String) -> Self {
        Self {
            id,
            name,
            content: NodeContent::Leaf {
                data: DEFAULT_DATA.to_string(),
            },
        }
    }

    /// Create a branch with the given children
    pub fn new_branch(id: String, name: String, children: Vec<TreeNode>) -> Self {
        Self {
            id,
            name,
            content: NodeContent::Branch { children },
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.content, NodeContent::Leaf { .. })
    }

    pub fn is_branch(&self) -> bool {
        matches!(self.content, NodeContent::Branch { .. })
    }

    /// Leaf data, or `None` for a branch
    pub fn data(&self) -> Option<&str> {
        match &self.content {
            NodeContent::Leaf { data } => Some(data),
            NodeContent::Branch { .. } => None,
        }
    }

    /// Children in order; empty for a leaf
    pub fn children(&self) -> &[TreeNode] {
        match &self.content {
            NodeContent::Branch { children } => children,
            NodeContent::Leaf { .. } => &[],
        }
    }

    /// Append a child, turning a leaf into a branch first
    ///
    /// Returns true if the node was a leaf and got promoted.
    pub fn push_child(&mut self, child: TreeNode) -> bool {
        match &mut self.content {
            NodeContent::Branch { children } => {
                children.push(child);
                false
            }
            NodeContent::Leaf { .. } => {
                self.content = NodeContent::Branch {
                    children: vec![child],
                };
                true
            }
        }
    }

    /// Detach a direct child by id
    ///
    /// When the last child goes the node becomes a leaf with default data.
    /// Returns the detached child and whether the node was demoted.
    pub fn remove_child(&mut self, child_id: &str) -> Option<(TreeNode, bool)> {
        let NodeContent::Branch { children } = &mut self.content else {
            return None;
        };
        let position = children.iter().position(|c| c.id == child_id)?;
        let removed = children.remove(position);

        let demoted = children.is_empty();
        if demoted {
            self.content = NodeContent::Leaf {
                data: DEFAULT_DATA.to_string(),
            };
        }
        Some((removed, demoted))
    }

    /// Pre-order list of this node's id and every descendant id
    pub fn subtree_ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<String>) {
        ids.push(self.id.clone());
        for child in self.children() {
            child.collect_ids(ids);
        }
    }

    /// Number of levels in this subtree (a lone leaf has depth 1)
    pub fn depth(&self) -> usize {
        1 + self.children().iter().map(TreeNode::depth).max().unwrap_or(0)
    }
}
