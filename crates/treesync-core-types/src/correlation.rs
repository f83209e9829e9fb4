//! Correlation identifiers
//!
//! A sync attempt spans two remote round trips; every log line emitted while
//! it runs carries the same `RequestId` so the phases can be stitched back
//! together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single sync attempt or remote call
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new RequestId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Wrap an existing string (e.g. an id echoed back by a remote)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
