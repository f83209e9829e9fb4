pub mod forest;
pub mod node_ops;

pub use forest::Forest;
pub use node_ops::Removal;
