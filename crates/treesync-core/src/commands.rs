//! Command inventory
//!
//! Every edit a caller can make to a session, as data. Commands are
//! executed by `apply()`.

/// One edit against an `EditSession`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Append a new root leaf
    CreateRoot { name: String },

    /// Append a default child leaf, promoting a leaf parent
    AddChild { parent_id: String },

    /// Delete a node and its subtree; equal ids address a root
    DeleteNode { parent_id: String, child_id: String },

    RenameNode { node_id: String, name: String },

    /// Replace a leaf's data
    SetLeafData { node_id: String, value: String },
}

impl Command {
    /// Stable operation name, used as the `op` log field
    pub fn op_name(&self) -> &'static str {
        match self {
            Command::CreateRoot { .. } => "create_root",
            Command::AddChild { .. } => "add_child",
            Command::DeleteNode { .. } => "delete_node",
            Command::RenameNode { .. } => "rename_node",
            Command::SetLeafData { .. } => "set_leaf_data",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_names() {
        let cmd = Command::DeleteNode {
            parent_id: "p".to_string(),
            child_id: "c".to_string(),
        };
        assert_eq!(cmd.op_name(), "delete_node");
        assert_eq!(
            Command::CreateRoot {
                name: "R".to_string()
            }
            .op_name(),
            "create_root"
        );
    }
}
