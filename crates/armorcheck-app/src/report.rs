use anyhow::Context;
use armorcheck_render::{
    RenderableData, RenderableFinding, RenderableLocation, RenderableReport, RenderableSeverity,
    RenderableVerdictStatus,
};
use armorcheck_types::{
    ArmorcheckData, ArmorcheckReport, Finding, ReportEnvelope, SCHEMA_REPORT_V1, Severity, Verdict,
    ids,
};
use time::OffsetDateTime;

use crate::verify::tool_meta;

pub fn parse_report_json(text: &str) -> anyhow::Result<ArmorcheckReport> {
    let value: serde_json::Value = serde_json::from_str(text).context("parse report json")?;

    let schema = value
        .get("schema")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();
    if schema != SCHEMA_REPORT_V1 {
        anyhow::bail!("unknown report schema: {schema:?} (expected {SCHEMA_REPORT_V1})");
    }

    serde_json::from_value(value).context("parse armorcheck report")
}

pub fn serialize_report(report: &ArmorcheckReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

pub fn to_renderable(report: &ArmorcheckReport) -> RenderableReport {
    let d = &report.data;
    RenderableReport {
        verdict: match report.verdict {
            Verdict::Pass => RenderableVerdictStatus::Pass,
            Verdict::Warn => RenderableVerdictStatus::Warn,
            Verdict::Fail => RenderableVerdictStatus::Fail,
        },
        findings: report.findings.iter().map(renderable_finding).collect(),
        data: RenderableData {
            project: d.project.clone(),
            policy: d.policy.clone(),
            region: d.region.clone(),
            rules_checked: d.rules_checked,
            assertions_checked: d.assertions_checked,
            findings_emitted: d.findings_emitted,
            findings_total: d.findings_total,
            truncated_reason: d.truncated_reason.clone(),
        },
    }
}

fn renderable_finding(f: &Finding) -> RenderableFinding {
    RenderableFinding {
        severity: match f.severity {
            Severity::Info => RenderableSeverity::Info,
            Severity::Warning => RenderableSeverity::Warning,
            Severity::Error => RenderableSeverity::Error,
        },
        check_id: Some(f.check_id.clone()),
        code: f.code.clone(),
        message: f.message.clone(),
        location: f.location.as_ref().map(|loc| RenderableLocation {
            policy: loc.policy.clone(),
            priority: loc.priority,
            field: loc.field.as_ref().map(|p| p.as_str().to_string()),
        }),
        help: f.help.clone(),
    }
}

/// A failed report carrying a single `tool.runtime` finding.
///
/// Written when the run could not complete, so CI still gets a report.
pub fn runtime_error_report(profile: &str, message: &str) -> ArmorcheckReport {
    let now = OffsetDateTime::now_utc();
    ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at: now,
        finished_at: now,
        verdict: Verdict::Fail,
        findings: vec![Finding {
            severity: Severity::Error,
            check_id: ids::CHECK_TOOL_RUNTIME.to_string(),
            code: ids::CODE_RUNTIME_ERROR.to_string(),
            message: message.to_string(),
            location: None,
            help: Some("Fix the tool error and re-run armorcheck.".to_string()),
            fingerprint: None,
            data: serde_json::Value::Null,
        }],
        data: ArmorcheckData {
            profile: profile.to_string(),
            findings_total: 1,
            findings_emitted: 1,
            ..ArmorcheckData::default()
        },
    }
}
