use crate::FieldPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

/// Stable schema identifier for armorcheck reports.
pub const SCHEMA_REPORT_V1: &str = "armorcheck.report.v1";

/// Severity is intentionally small: it maps cleanly to CI signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Where a finding points: the policy itself, or one rule of it, plus the field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub policy: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldPath>,
}

impl Location {
    pub fn policy(policy: &str, field: Option<FieldPath>) -> Self {
        Self {
            policy: policy.to_string(),
            priority: None,
            field,
        }
    }

    pub fn rule(policy: &str, priority: u32, field: Option<FieldPath>) -> Self {
        Self {
            policy: policy.to_string(),
            priority: Some(priority),
            field,
        }
    }

    /// Human label used as the message prefix: `policy` or `priority N`.
    pub fn subject_label(&self) -> String {
        match self.priority {
            Some(p) => format!("priority {p}"),
            None => "policy".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Finding {
    pub severity: Severity,
    pub check_id: String,
    pub code: String,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,

    /// Stable identifier intended for dedup and trending: a hash of
    /// `check_id + code + policy + priority + field`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,

    /// Check-specific structured payload (`expected` / `observed`, counts, indices).
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: JsonValue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Warn,
    Fail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Armorcheck-specific summary payload for the report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ArmorcheckData {
    pub profile: String,

    pub project: String,
    pub policy: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Number of rule priorities described and compared.
    pub rules_checked: u32,
    /// Number of describe documents compared (policy + rules).
    pub documents_checked: u32,
    /// Number of individual field expectations evaluated.
    pub assertions_checked: u32,

    pub findings_total: u32,
    pub findings_emitted: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truncated_reason: Option<String>,
}

/// A generic receipt/envelope.
///
/// Keeping this generic allows tool-specific data while still enforcing a stable outer shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ReportEnvelope<TData = ArmorcheckData> {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub verdict: Verdict,
    pub findings: Vec<Finding>,
    pub data: TData,
}

pub type ArmorcheckReport = ReportEnvelope<ArmorcheckData>;
