//! Repository layer for node rows
//!
//! Bridges flat persisted rows and the in-memory forest

pub mod hydration;
pub mod node_repo;

pub use node_repo::NodeRepo;
