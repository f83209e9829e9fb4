pub mod node;

pub use node::{NodeContent, TreeNode, DEFAULT_CHILD_NAME, DEFAULT_DATA, DEFAULT_ROOT_NAME};
