//! Suite parsing and profile/preset resolution.
//!
//! This crate is intentionally IO-free: it parses suites provided as strings and
//! resolves them against provisioning outputs handed in by the caller.

#![forbid(unsafe_code)]

mod model;
mod presets;
mod resolve;
mod suite;

pub use model::{
    CheckConfig, NumberOrText, OptionScalar, PolicyConfig, RateLimitConfig, RedirectConfig,
    RuleConfig, SCHEMA_SUITE_V1, SuiteConfigV1, TargetConfig, ThresholdConfig,
};
pub use presets::PROFILES;
pub use resolve::{Overrides, ResolvedConfig};
pub use suite::{DEFAULT_POLICY_OUTPUT, DEFAULT_PROJECT_OUTPUT};

use armorcheck_domain::model::Suite;
use std::collections::BTreeMap;

/// Parse a suite file into the typed user-facing model.
pub fn parse_suite_toml(input: &str) -> anyhow::Result<SuiteConfigV1> {
    let cfg: SuiteConfigV1 = toml::from_str(input)?;
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_SUITE_V1
    {
        anyhow::bail!("unsupported suite schema: {schema} (expected {SCHEMA_SUITE_V1})");
    }
    Ok(cfg)
}

/// Resolve the effective config used by the verifier (profiles + overrides + per-check config).
pub fn resolve_config(cfg: &SuiteConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}

/// Build the expected policy and rules; target coordinates come from `outputs`.
pub fn build_suite(cfg: &SuiteConfigV1, outputs: &BTreeMap<String, String>) -> anyhow::Result<Suite> {
    suite::build_suite(cfg, outputs)
}
