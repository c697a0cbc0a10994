//! Render use cases: markdown, GitHub annotations and plain text from in-memory reports.

use armorcheck_render::RenderableReport;

pub fn render_markdown(report: &RenderableReport) -> String {
    armorcheck_render::render_markdown(report)
}

pub fn render_annotations(report: &RenderableReport, max: usize) -> Vec<String> {
    armorcheck_render::render_github_annotations(report)
        .into_iter()
        .take(max)
        .collect()
}

pub fn render_text(report: &RenderableReport) -> String {
    armorcheck_render::render_text(report)
}
