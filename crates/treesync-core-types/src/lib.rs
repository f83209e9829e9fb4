//! Core types shared across TreeSync crates
//!
//! - **Correlation types**: RequestId for tagging one sync attempt end to end
//! - **Schema constants**: Canonical field keys and event names used by the
//!   logging facility

pub mod correlation;
pub mod schema;

pub use correlation::RequestId;
