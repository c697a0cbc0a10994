//! Rendering utilities for CI surfaces (Markdown, GitHub annotations, plain text).

#![forbid(unsafe_code)]

mod gha;
mod markdown;
mod model;
mod text;

pub use gha::render_github_annotations;
pub use markdown::render_markdown;
pub use model::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableVerdictStatus,
};
pub use text::render_text;
