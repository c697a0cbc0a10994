use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SCHEMA_SUITE_V1: &str = "armorcheck.suite.v1";

/// Suite file schema v1.
///
/// This is a *user-facing* model: it is intentionally permissive and is
/// validated when it is turned into a domain `Suite`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SuiteConfigV1 {
    /// Optional schema string for tooling (`armorcheck.suite.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// When to fail the run: `error` (default), `warning` or `never`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fail_on: Option<String>,

    /// How many findings to emit before truncating the list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_findings: Option<u32>,

    /// Map of check_id -> config.
    #[serde(default)]
    pub checks: BTreeMap<String, CheckConfig>,

    #[serde(default)]
    pub target: TargetConfig,

    #[serde(default)]
    pub policy: PolicyConfig,

    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Override preset enable/disable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,

    /// Override preset severity: `info`, `warning`, `error`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// Where the policy under test lives.
///
/// Each coordinate is either a literal or the name of a provisioning output;
/// a literal wins.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Output holding the project id. Default: `project_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_output: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<String>,

    /// Output holding the policy name. Default: `policy_name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_output: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Output holding the region; global policies leave this unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_output: Option<String>,
}

/// Expected policy state. Unset fields are not checked.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PolicyConfig {
    /// Defaults to the resolved policy name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// `CLOUD_ARMOR`, `CLOUD_ARMOR_EDGE` or `CLOUD_ARMOR_NETWORK`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub policy_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_parsing: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Paths below `adaptiveProtectionConfig`, e.g. `layer7DdosDefenseConfig.enable`.
    #[serde(default)]
    pub adaptive_protection: BTreeMap<String, OptionScalar>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum OptionScalar {
    Flag(bool),
    Text(String),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub priority: u32,

    /// Wire form: `allow`, `deny(502)`, `redirect`, `throttle`, `rate_based_ban`.
    pub action: String,

    /// `""` expects no description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub preview: bool,

    /// Free-form match expression, compared verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    /// Versioned match label, e.g. `SRC_IPS_V1`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub versioned_expr: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_ip_ranges: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimitConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<RedirectConfig>,
}

/// Numbers may be written as TOML integers or strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(i64),
    Text(String),
}

impl NumberOrText {
    pub fn to_text(&self) -> String {
        match self {
            NumberOrText::Number(n) => n.to_string(),
            NumberOrText::Text(s) => s.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ThresholdConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<NumberOrText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_sec: Option<NumberOrText>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RateLimitConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conform_action: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exceed_action: Option<String>,

    /// `""` expects the key to be unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enforce_on_key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_limit_threshold: Option<ThresholdConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_duration_sec: Option<NumberOrText>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ban_threshold: Option<ThresholdConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RedirectConfig {
    /// `GOOGLE_RECAPTCHA` or `EXTERNAL_302`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub redirect_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}
