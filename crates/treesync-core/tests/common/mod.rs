use treesync_core::{EditSession, Forest, TreeNode};

/// Build a leaf with the given id, name and data
#[allow(dead_code)]
pub fn leaf(id: &str, name: &str, data: &str) -> TreeNode {
    let mut node = TreeNode::new_leaf(id.to_string(), name.to_string());
    node.content = treesync_core::NodeContent::Leaf {
        data: data.to_string(),
    };
    node
}

#[allow(dead_code)]
pub fn branch(id: &str, name: &str, children: Vec<TreeNode>) -> TreeNode {
    TreeNode::new_branch(id.to_string(), name.to_string(), children)
}

/// A forest as if just loaded from the remote:
///
/// ```text
/// p (branch)
/// ├── x "X" = "x-data"
/// └── y (branch)
///     └── z "Z" = "z-data"
/// q "Q" = "q-data"
/// ```
#[allow(dead_code)]
pub fn synced_forest() -> Forest {
    Forest::from_roots(vec![
        branch(
            "p",
            "P",
            vec![
                leaf("x", "X", "x-data"),
                branch("y", "Y", vec![leaf("z", "Z", "z-data")]),
            ],
        ),
        leaf("q", "Q", "q-data"),
    ])
}

/// Session over `synced_forest()` with nothing pending
#[allow(dead_code)]
pub fn synced_session() -> EditSession {
    EditSession::from_forest(synced_forest())
}
