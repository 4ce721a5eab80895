//! Render use cases: markdown from in-memory or on-disk reports.

use crate::report::{parse_report_json, to_renderable};
use licguard_render::RenderableReport;
use licguard_types::LicguardReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    licguard_render::render_markdown(report)
}

pub fn report_markdown(report: &LicguardReport) -> String {
    render_markdown(&to_renderable(report))
}

/// Parse a serialized report and render it as markdown.
pub fn markdown_from_json(text: &str) -> anyhow::Result<String> {
    let report = parse_report_json(text)?;
    Ok(report_markdown(&report))
}
