//! Use case orchestration for licguard.
//!
//! This crate provides the application layer: use cases that coordinate the facts, settings,
//! domain, and render layers. The CLI crate depends on this and only handles argument parsing
//! and I/O.

#![forbid(unsafe_code)]

mod browse;
mod check;
mod render;
mod report;
mod session;
mod tree;

pub use browse::{AllowOutcome, format_rows, run_allow, run_expand};
pub use check::{CheckOutput, run_check, verdict_exit_code};
pub use render::{markdown_from_json, render_markdown, report_markdown};
pub use report::{
    parse_report_json, runtime_error_report, serialize_report, to_renderable, tool_meta,
};
pub use session::{Session, SessionInput, load_overrides, open_session, resolve_settings};
pub use tree::{TreeFormat, find_artifact, run_tree, tree_nodes};
