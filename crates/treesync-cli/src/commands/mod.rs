//! Subcommand implementations
//!
//! Each subcommand opens the configured store, loads a session from it and
//! prints to stdout; logs go to stderr.

pub mod add_root;
pub mod edit;
pub mod show;

use treesync_core::RenderMode;

pub(crate) fn render_mode(indented: bool) -> RenderMode {
    if indented {
        RenderMode::Indented
    } else {
        RenderMode::Compact
    }
}
