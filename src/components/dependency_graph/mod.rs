//! Interactive dependency graph widget.
//!
//! Renders the repository's file/import/package structure on an HTML canvas:
//! - Force-directed or hierarchical layout, selected at runtime
//! - Per-type shapes, colors, and sizes; per-relation edge colors and arrows
//! - Type toggles, free-text search with context closure, and depth limiting
//! - Selection highlighting, pan/zoom/fit, node dragging, collapsible legend

mod component;
mod layout;
mod legend;
mod render;
pub mod scale;
mod state;
pub mod theme;

pub use component::DependencyGraph;
pub use state::{GraphViewState, LayoutMode};
