//! Turn the permissive suite model into strict domain specs.

use crate::model::{
    NumberOrText, OptionScalar, PolicyConfig, RateLimitConfig, RuleConfig, SuiteConfigV1,
    TargetConfig, ThresholdConfig,
};
use anyhow::Context;
use armorcheck_domain::model::{
    AdvancedOptions, MatchSpec, OptionValue, PolicySpec, PolicyType, RateLimitSpec, RedirectSpec,
    RuleAction, RuleSpec, Suite, Target, ThresholdSpec,
};
use std::collections::BTreeMap;

pub const DEFAULT_PROJECT_OUTPUT: &str = "project_id";
pub const DEFAULT_POLICY_OUTPUT: &str = "policy_name";

/// Build the domain suite, resolving target coordinates from provisioning outputs.
pub fn build_suite(cfg: &SuiteConfigV1, outputs: &BTreeMap<String, String>) -> anyhow::Result<Suite> {
    let target = resolve_target(&cfg.target, outputs)?;
    let policy = policy_spec(&cfg.policy, &target)?;
    let rules = cfg
        .rules
        .iter()
        .map(|r| rule_spec(r).with_context(|| format!("invalid rule at priority {}", r.priority)))
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Suite::new(target, policy, rules)?)
}

fn resolve_target(t: &TargetConfig, outputs: &BTreeMap<String, String>) -> anyhow::Result<Target> {
    let project = coordinate(
        "project",
        t.project.as_deref(),
        Some(t.project_output.as_deref().unwrap_or(DEFAULT_PROJECT_OUTPUT)),
        outputs,
    )?;
    let policy = coordinate(
        "policy",
        t.policy.as_deref(),
        Some(t.policy_output.as_deref().unwrap_or(DEFAULT_POLICY_OUTPUT)),
        outputs,
    )?;
    let region = match (t.region.as_deref(), t.region_output.as_deref()) {
        (None, None) => None,
        (literal, output) => coordinate("region", literal, output, outputs)?,
    };

    Ok(Target {
        project: project.unwrap_or_default(),
        policy: policy.unwrap_or_default(),
        region,
    })
}

fn coordinate(
    what: &str,
    literal: Option<&str>,
    output: Option<&str>,
    outputs: &BTreeMap<String, String>,
) -> anyhow::Result<Option<String>> {
    if let Some(v) = literal {
        return Ok(Some(v.to_string()));
    }
    let Some(name) = output else {
        return Ok(None);
    };
    match outputs.get(name) {
        Some(v) if !v.is_empty() => Ok(Some(v.clone())),
        Some(_) => anyhow::bail!("provisioning output `{name}` ({what}) is empty"),
        None => anyhow::bail!("missing provisioning output `{name}` ({what})"),
    }
}

fn policy_spec(p: &PolicyConfig, target: &Target) -> anyhow::Result<PolicySpec> {
    let policy_type = p
        .policy_type
        .as_deref()
        .map(|t| {
            PolicyType::parse(t).with_context(|| {
                format!(
                    "unknown policy type: {t} (expected CLOUD_ARMOR|CLOUD_ARMOR_EDGE|CLOUD_ARMOR_NETWORK)"
                )
            })
        })
        .transpose()?;

    let adaptive_protection = p
        .adaptive_protection
        .iter()
        .map(|(k, v)| {
            let value = match v {
                OptionScalar::Flag(b) => OptionValue::Flag(*b),
                OptionScalar::Text(s) => OptionValue::Text(s.clone()),
            };
            (k.clone(), value)
        })
        .collect();

    Ok(PolicySpec {
        name: p.name.clone().unwrap_or_else(|| target.policy.clone()),
        description: p.description.clone(),
        policy_type,
        adaptive_protection,
        advanced_options: AdvancedOptions {
            json_parsing: p.json_parsing.clone(),
            log_level: p.log_level.clone(),
        },
    })
}

fn rule_spec(r: &RuleConfig) -> anyhow::Result<RuleSpec> {
    let action = RuleAction::parse(&r.action).with_context(|| {
        format!(
            "unknown action: {} (expected allow|deny(<status>)|redirect|throttle|rate_based_ban)",
            r.action
        )
    })?;

    let matcher = match (&r.expression, &r.versioned_expr, &r.src_ip_ranges) {
        (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
            anyhow::bail!("expression and versioned_expr/src_ip_ranges are mutually exclusive")
        }
        (Some(expression), None, None) => Some(MatchSpec::Expr {
            expression: expression.clone(),
        }),
        (None, Some(_), None) => anyhow::bail!("versioned_expr requires src_ip_ranges"),
        (None, versioned_expr, Some(ranges)) => Some(MatchSpec::VersionedExpr {
            versioned_expr: versioned_expr.clone(),
            src_ip_ranges: ranges.clone(),
        }),
        (None, None, None) => None,
    };

    Ok(RuleSpec {
        priority: r.priority,
        action,
        description: r.description.clone(),
        matcher,
        preview: r.preview,
        rate_limit: r.rate_limit.as_ref().map(rate_limit_spec),
        redirect: r.redirect.as_ref().map(|rd| RedirectSpec {
            redirect_type: rd.redirect_type.clone(),
            target: rd.target.clone(),
        }),
    })
}

fn rate_limit_spec(rl: &RateLimitConfig) -> RateLimitSpec {
    RateLimitSpec {
        conform_action: rl.conform_action.clone(),
        exceed_action: rl.exceed_action.clone(),
        enforce_on_key: rl.enforce_on_key.clone(),
        rate_limit_threshold: rl.rate_limit_threshold.as_ref().map(threshold_spec),
        ban_duration_sec: rl.ban_duration_sec.as_ref().map(NumberOrText::to_text),
        ban_threshold: rl.ban_threshold.as_ref().map(threshold_spec),
    }
}

fn threshold_spec(t: &ThresholdConfig) -> ThresholdSpec {
    ThresholdSpec {
        count: t.count.as_ref().map(NumberOrText::to_text),
        interval_sec: t.interval_sec.as_ref().map(NumberOrText::to_text),
    }
}
