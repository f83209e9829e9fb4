pub mod snapshot_render;

pub use snapshot_render::{render, RenderMode};
