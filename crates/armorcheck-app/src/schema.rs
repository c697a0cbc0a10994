//! JSON schemas for the report and suite formats.

use anyhow::Context;
use armorcheck_settings::SuiteConfigV1;
use armorcheck_types::ArmorcheckReport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaKind {
    Report,
    Suite,
}

/// Pretty-printed JSON schema for `kind`.
pub fn run_schema(kind: SchemaKind) -> anyhow::Result<String> {
    let schema = match kind {
        SchemaKind::Report => schemars::schema_for!(ArmorcheckReport),
        SchemaKind::Suite => schemars::schema_for!(SuiteConfigV1),
    };
    serde_json::to_string_pretty(&schema).context("serialize schema")
}
