use uuid::Uuid;

use super::forest::Forest;
use crate::errors::{Result, TreeSyncError};
use crate::model::{NodeContent, TreeNode, DEFAULT_CHILD_NAME};

/// What a successful delete took out of the forest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal {
    /// The directly targeted id
    pub target_id: String,
    /// Pre-order ids of the target and all of its descendants
    pub removed_ids: Vec<String>,
    /// Parent that lost its last child and became a leaf
    pub demoted_parent: Option<String>,
}

/// Append a new root leaf holding the default data
///
/// Generates a UUID v7 for the node id. Always succeeds.
pub fn create_root(forest: &mut Forest, name: String) -> String {
    let id = Uuid::now_v7().to_string();
    forest.push_root(TreeNode::new_leaf(id.clone(), name));
    id
}

/// Append a new default leaf under `parent_id`
///
/// A leaf parent is promoted to a branch first, dropping its data.
///
/// # Errors
/// * `NodeNotFound` - If the parent doesn't exist
pub fn add_child(forest: &mut Forest, parent_id: &str) -> Result<String> {
    let parent = forest.get_node_mut(parent_id)?;

    let id = Uuid::now_v7().to_string();
    parent.push_child(TreeNode::new_leaf(id.clone(), DEFAULT_CHILD_NAME.to_string()));

    Ok(id)
}

/// Delete a node and its whole subtree
///
/// `parent_id == child_id` addresses a root. Otherwise `child_id` must be a
/// direct child of `parent_id`; a parent left without children becomes a
/// leaf with default data.
///
/// # Errors
/// * `RootNotFound` - If a root delete names an id that is not a root
/// * `NodeNotFound` - If the parent doesn't exist
/// * `ChildNotFound` - If the child is not a direct child of the parent
pub fn delete_node(forest: &mut Forest, parent_id: &str, child_id: &str) -> Result<Removal> {
    if parent_id == child_id {
        let root = forest
            .remove_root(child_id)
            .ok_or_else(|| TreeSyncError::RootNotFound {
                node_id: child_id.to_string(),
            })?;
        return Ok(Removal {
            target_id: child_id.to_string(),
            removed_ids: root.subtree_ids(),
            demoted_parent: None,
        });
    }

    let parent = forest.get_node_mut(parent_id)?;
    let (removed, demoted) =
        parent
            .remove_child(child_id)
            .ok_or_else(|| TreeSyncError::ChildNotFound {
                parent_id: parent_id.to_string(),
                child_id: child_id.to_string(),
            })?;

    Ok(Removal {
        target_id: child_id.to_string(),
        removed_ids: removed.subtree_ids(),
        demoted_parent: demoted.then(|| parent_id.to_string()),
    })
}

/// Set a node's name
///
/// # Errors
/// * `NodeNotFound` - If the node doesn't exist
pub fn rename_node(forest: &mut Forest, id: &str, name: String) -> Result<()> {
    let node = forest.get_node_mut(id)?;
    node.name = name;
    Ok(())
}

/// Set a leaf's data value
///
/// # Errors
/// * `NodeNotFound` - If the node doesn't exist
/// * `NotALeaf` - If the node is currently a branch
pub fn set_leaf_data(forest: &mut Forest, id: &str, value: String) -> Result<()> {
    let node = forest.get_node_mut(id)?;
    match &mut node.content {
        NodeContent::Leaf { data } => {
            *data = value;
            Ok(())
        }
        NodeContent::Branch { .. } => Err(TreeSyncError::NotALeaf {
            node_id: id.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_DATA;

    #[test]
    fn test_create_root() {
        let mut forest = Forest::new();
        let id = create_root(&mut forest, "R".to_string());

        let root = forest.get_node(&id).unwrap();
        assert_eq!(root.name, "R");
        assert_eq!(root.data(), Some(DEFAULT_DATA));
        assert!(forest.is_root(&id));
    }

    #[test]
    fn test_add_child_promotes_parent() {
        let mut forest = Forest::new();
        let root = create_root(&mut forest, "R".to_string());
        set_leaf_data(&mut forest, &root, "custom".to_string()).unwrap();

        let child = add_child(&mut forest, &root).unwrap();

        let parent = forest.get_node(&root).unwrap();
        assert!(parent.is_branch());
        assert_eq!(parent.data(), None);
        let child = forest.get_node(&child).unwrap();
        assert_eq!(child.name, DEFAULT_CHILD_NAME);
        assert_eq!(child.data(), Some(DEFAULT_DATA));
    }

    #[test]
    fn test_add_child_unknown_parent() {
        let mut forest = Forest::new();
        let result = add_child(&mut forest, "missing");
        assert!(matches!(result, Err(TreeSyncError::NodeNotFound { .. })));
    }

    #[test]
    fn test_delete_last_child_demotes_parent() {
        let mut forest = Forest::new();
        let root = create_root(&mut forest, "R".to_string());
        let child = add_child(&mut forest, &root).unwrap();
        let grandchild = add_child(&mut forest, &child).unwrap();

        let removal = delete_node(&mut forest, &root, &child).unwrap();

        assert_eq!(removal.removed_ids, vec![child.clone(), grandchild]);
        assert_eq!(removal.demoted_parent, Some(root.clone()));
        assert_eq!(forest.get_node(&root).unwrap().data(), Some(DEFAULT_DATA));
        assert!(!forest.contains(&child));
    }

    #[test]
    fn test_delete_root() {
        let mut forest = Forest::new();
        let root = create_root(&mut forest, "R".to_string());
        add_child(&mut forest, &root).unwrap();

        let removal = delete_node(&mut forest, &root, &root).unwrap();

        assert_eq!(removal.removed_ids.len(), 2);
        assert!(removal.demoted_parent.is_none());
        assert!(forest.is_empty());
    }

    #[test]
    fn test_delete_errors_leave_forest_untouched() {
        let mut forest = Forest::new();
        let root = create_root(&mut forest, "R".to_string());
        let child = add_child(&mut forest, &root).unwrap();
        let before = forest.clone();

        assert!(matches!(
            delete_node(&mut forest, &child, &child),
            Err(TreeSyncError::RootNotFound { .. })
        ));
        assert!(matches!(
            delete_node(&mut forest, "missing", &child),
            Err(TreeSyncError::NodeNotFound { .. })
        ));
        assert!(matches!(
            delete_node(&mut forest, &child, &root),
            Err(TreeSyncError::ChildNotFound { .. })
        ));
        assert_eq!(forest, before);
    }

    #[test]
    fn test_set_leaf_data_on_branch_fails() {
        let mut forest = Forest::new();
        let root = create_root(&mut forest, "R".to_string());
        add_child(&mut forest, &root).unwrap();

        let result = set_leaf_data(&mut forest, &root, "v".to_string());
        assert!(matches!(result, Err(TreeSyncError::NotALeaf { .. })));
    }

    #[test]
    fn test_rename_node() {
        let mut forest = Forest::new();
        let root = create_root(&mut forest, "R".to_string());
        rename_node(&mut forest, &root, "Renamed".to_string()).unwrap();
        assert_eq!(forest.get_node(&root).unwrap().name, "Renamed");

        let result = rename_node(&mut forest, "missing", "x".to_string());
        assert!(matches!(result, Err(TreeSyncError::NodeNotFound { .. })));
    }
}
