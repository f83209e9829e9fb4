//! TreeSync Store - the remote side of a sync
//!
//! Provides:
//! - The `RemoteStore` async trait every sync target implements
//! - `InMemoryRemote` for tests, with per-operation failure injection
//! - `SqliteRemote` backed by a single SQLite file with embedded migrations
//! - Hydration of flat node rows back into a forest

pub mod db;
pub mod errors;
pub mod memory;
pub mod migrations;
pub mod remote;
pub mod repo;
pub mod sqlite;

// Re-export key types
pub use errors::Result;
pub use memory::{InMemoryRemote, RemoteCall, RemoteOp};
pub use remote::RemoteStore;
pub use sqlite::SqliteRemote;
