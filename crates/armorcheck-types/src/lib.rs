//! Stable DTOs and IDs used across the armorcheck workspace.
//!
//! This crate is intentionally boring:
//! - data types for the emitted receipt/report
//! - stable string IDs and codes
//! - canonical dotted field paths into describe documents
//! - explain registry for remediation guidance

#![forbid(unsafe_code)]

pub mod explain;
pub mod field;
pub mod ids;
pub mod receipt;

pub use explain::{lookup_explanation, ExamplePair, Explanation};
pub use field::FieldPath;
pub use receipt::{
    ArmorcheckData, ArmorcheckReport, Finding, Location, ReportEnvelope, Severity, ToolMeta,
    Verdict, SCHEMA_REPORT_V1,
};
