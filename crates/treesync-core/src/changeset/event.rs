use super::record::NodeRecord;

/// One observed mutation, carrying the post-mutation state the tracker needs
///
/// Events are produced by `EditSession` after the forest has been changed,
/// so every `NodeRecord` here describes the node as it is now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A root or child was added
    Created {
        node: NodeRecord,
        /// The parent, if it was a leaf and just became a branch
        promoted_parent: Option<NodeRecord>,
    },

    /// A node's name changed
    Renamed { node: NodeRecord },

    /// A leaf's data changed
    DataEdited { node: NodeRecord },

    /// A node and its subtree left the forest
    Deleted {
        target_id: String,
        /// Pre-order ids of the target and every descendant
        removed_ids: Vec<String>,
        /// The parent, if it lost its last child and became a leaf
        demoted_parent: Option<NodeRecord>,
    },

    /// The create/update phase stored these pending creates, but the sync
    /// has not finished; their entries stay queued for the retry
    Persisted { ids: Vec<String> },

    /// The remote confirmed these nodes out of band (e.g. a root published
    /// on its own), so they are no longer pending
    Acknowledged { ids: Vec<String> },
}
