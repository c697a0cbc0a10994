//! Use case orchestration for armorcheck.
//!
//! This crate provides the application layer: use cases that coordinate the settings, domain,
//! describe and render layers. It is intentionally thin and delegates heavy lifting to them.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod explain;
mod render;
mod report;
mod schema;
mod verify;

pub use explain::{
    ExplainOutput, IdentifierKind, format_explanation, format_not_found, run_explain,
};
pub use render::{render_annotations, render_markdown, render_text};
pub use report::{parse_report_json, runtime_error_report, serialize_report, to_renderable};
pub use schema::{SchemaKind, run_schema};
pub use verify::{VerifyInput, VerifyOutput, describer_for, run_verify, verdict_exit_code};
