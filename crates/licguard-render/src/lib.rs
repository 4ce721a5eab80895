//! Rendering for licguard results: dependency trees (text, HTML) and Markdown reports.
//!
//! Renderers take their own small models so they stay independent of the domain crate.

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod tree;

pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableNodeStatus, RenderableReport,
    RenderableRoot, RenderableSeverity, RenderableTreeNode, RenderableVerdictStatus,
};
pub use tree::{render_tree_html, render_tree_text};
