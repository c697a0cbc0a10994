use armorcheck_domain::policy::{CheckPolicy, EffectiveConfig, FailOn};
use armorcheck_types::Severity;
use std::collections::BTreeMap;

pub const PROFILES: &[&str] = &["strict", "warn", "audit"];

/// Preset profiles. Returns `None` for an unknown name.
pub fn preset(profile: &str) -> Option<EffectiveConfig> {
    match profile {
        "strict" => Some(strict_profile()),
        "warn" => Some(warn_profile()),
        "audit" => Some(audit_profile()),
        _ => None,
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on: FailOn::Error,
        max_findings: 200,
        checks: default_checks(Severity::Error),
    }
}

fn warn_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "warn".to_string(),
        fail_on: FailOn::Warning,
        max_findings: 200,
        checks: default_checks(Severity::Warning),
    }
}

fn audit_profile() -> EffectiveConfig {
    // Drift survey: everything is reported, nothing fails.
    EffectiveConfig {
        profile: "audit".to_string(),
        fail_on: FailOn::Never,
        max_findings: 200,
        checks: default_checks(Severity::Warning),
    }
}

fn default_checks(default_severity: Severity) -> BTreeMap<String, CheckPolicy> {
    use armorcheck_types::ids::*;

    [
        CHECK_POLICY_FIELDS,
        CHECK_RULE_FIELDS,
        CHECK_RULE_MATCH,
        CHECK_RULE_RATE_LIMIT,
        CHECK_RULE_REDIRECT,
        CHECK_DESCRIBE_DOCUMENTS,
    ]
    .into_iter()
    .map(|id| (id.to_string(), CheckPolicy::enabled(default_severity)))
    .collect()
}
