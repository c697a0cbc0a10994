//! The `verify` use case: load a suite, describe live state, produce a report.

use anyhow::Context;
use armorcheck_domain::Describe;
use armorcheck_domain::report::DomainReport;
use armorcheck_gcloud::{FixtureDescriber, GcloudDescriber, Outputs};
use armorcheck_settings::{Overrides, ResolvedConfig};
use armorcheck_types::{ArmorcheckReport, ReportEnvelope, SCHEMA_REPORT_V1, ToolMeta, Verdict};
use camino::Utf8Path;
use time::OffsetDateTime;
use tracing::info;

/// Input for the verify use case.
pub struct VerifyInput<'a> {
    /// Suite file contents.
    pub suite_text: &'a str,
    /// Provisioning outputs, overrides already applied.
    pub outputs: &'a Outputs,
    /// Where live state comes from.
    pub describe: &'a dyn Describe,
    /// CLI overrides.
    pub overrides: Overrides,
}

/// Output from the verify use case.
#[derive(Clone, Debug)]
pub struct VerifyOutput {
    pub report: ArmorcheckReport,
    pub resolved_config: ResolvedConfig,
}

/// Recorded describe output when `fixtures` is given, `gcloud` otherwise.
pub fn describer_for(fixtures: Option<&Utf8Path>) -> Box<dyn Describe> {
    match fixtures {
        Some(dir) => Box::new(FixtureDescriber::new(dir)),
        None => Box::new(GcloudDescriber::from_env()),
    }
}

/// Run the verify use case: parse the suite, resolve the target, verify policy and rules.
pub fn run_verify(input: VerifyInput<'_>) -> anyhow::Result<VerifyOutput> {
    let started_at = OffsetDateTime::now_utc();

    let cfg = armorcheck_settings::parse_suite_toml(input.suite_text).context("parse suite")?;
    let resolved = armorcheck_settings::resolve_config(&cfg, input.overrides.clone())
        .context("resolve config")?;
    let suite =
        armorcheck_settings::build_suite(&cfg, input.outputs.as_map()).context("build suite")?;

    info!(
        policy = %suite.target.resource(),
        rules = suite.rules().len(),
        profile = %resolved.effective.profile,
        "verifying security policy"
    );

    let DomainReport {
        verdict,
        findings,
        data,
        counts,
    } = armorcheck_domain::verify_suite(&suite, input.describe, &resolved.effective)
        .with_context(|| format!("describe {}", suite.target.resource()))?;

    info!(
        verdict = ?verdict,
        errors = counts.error,
        warnings = counts.warning,
        assertions = data.assertions_checked,
        findings = data.findings_total,
        "verification finished"
    );

    let report = ReportEnvelope {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: tool_meta(),
        started_at,
        finished_at: OffsetDateTime::now_utc(),
        verdict,
        findings,
        data,
    };

    Ok(VerifyOutput {
        report,
        resolved_config: resolved,
    })
}

pub(crate) fn tool_meta() -> ToolMeta {
    ToolMeta {
        name: "armorcheck".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }
}

/// Map verdict to exit code: 0 = pass/warn, 2 = fail.
pub fn verdict_exit_code(verdict: Verdict) -> i32 {
    match verdict {
        Verdict::Pass => 0,
        Verdict::Warn => 0,
        Verdict::Fail => 2,
    }
}
