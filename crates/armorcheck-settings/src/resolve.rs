use crate::{model::SuiteConfigV1, presets};
use anyhow::Context;
use armorcheck_domain::policy::{EffectiveConfig, FailOn};
use armorcheck_types::Severity;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub max_findings: Option<u32>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

/// Precedence: CLI overrides, then the suite file, then the preset.
pub fn resolve_config(cfg: &SuiteConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let Some(mut effective) = presets::preset(&profile) else {
        anyhow::bail!(
            "unknown profile: {profile} (expected {})",
            presets::PROFILES.join("|")
        );
    };

    if let Some(mf) = overrides.max_findings.or(cfg.max_findings) {
        effective.max_findings = mf as usize;
    }

    for (check_id, cc) in cfg.checks.iter() {
        let Some(entry) = effective.checks.get_mut(check_id) else {
            anyhow::bail!(
                "unknown check_id in [checks]: {check_id} (see `armorcheck explain`)"
            );
        };

        if let Some(enabled) = cc.enabled {
            entry.enabled = enabled;
        }
        if let Some(sev) = cc.severity.as_deref() {
            entry.severity =
                parse_severity(sev).with_context(|| format!("invalid severity for {check_id}"))?;
        }
    }

    if let Some(fail_on_s) = cfg.fail_on.as_deref() {
        effective.fail_on = parse_fail_on(fail_on_s)?;
    }

    Ok(ResolvedConfig { effective })
}

fn parse_severity(v: &str) -> anyhow::Result<Severity> {
    match v {
        "info" => Ok(Severity::Info),
        "warning" | "warn" => Ok(Severity::Warning),
        "error" => Ok(Severity::Error),
        other => anyhow::bail!("unknown severity: {other} (expected info|warning|error)"),
    }
}

fn parse_fail_on(v: &str) -> anyhow::Result<FailOn> {
    match v {
        "error" => Ok(FailOn::Error),
        "warning" | "warn" => Ok(FailOn::Warning),
        "never" => Ok(FailOn::Never),
        other => anyhow::bail!("unknown fail_on: {other} (expected error|warning|never)"),
    }
}
