use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Where the policy lives. Built from provisioning outputs, passed into every call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Target {
    pub project: String,
    pub policy: String,
    /// Regional policies (network edge, regional backends) carry a region.
    pub region: Option<String>,
}

impl Target {
    /// Resource label used in logs and errors.
    pub fn resource(&self) -> String {
        match &self.region {
            Some(region) => format!(
                "projects/{}/regions/{}/securityPolicies/{}",
                self.project, region, self.policy
            ),
            None => format!(
                "projects/{}/global/securityPolicies/{}",
                self.project, self.policy
            ),
        }
    }

    pub fn rule_resource(&self, priority: u32) -> String {
        format!("{}/rules/{}", self.resource(), priority)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PolicyType {
    CloudArmor,
    CloudArmorEdge,
    CloudArmorNetwork,
}

impl PolicyType {
    pub fn as_str(self) -> &'static str {
        match self {
            PolicyType::CloudArmor => "CLOUD_ARMOR",
            PolicyType::CloudArmorEdge => "CLOUD_ARMOR_EDGE",
            PolicyType::CloudArmorNetwork => "CLOUD_ARMOR_NETWORK",
        }
    }

    pub fn parse(v: &str) -> Option<Self> {
        match v {
            "CLOUD_ARMOR" => Some(PolicyType::CloudArmor),
            "CLOUD_ARMOR_EDGE" => Some(PolicyType::CloudArmorEdge),
            "CLOUD_ARMOR_NETWORK" => Some(PolicyType::CloudArmorNetwork),
            _ => None,
        }
    }
}

/// Expected value of an adaptive-protection option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AdvancedOptions {
    pub json_parsing: Option<String>,
    pub log_level: Option<String>,
}

/// Expected state of the security policy itself. `None` fields are not checked.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PolicySpec {
    pub name: String,
    pub description: Option<String>,
    pub policy_type: Option<PolicyType>,
    /// Keys are paths below `adaptiveProtectionConfig`, e.g.
    /// `layer7DdosDefenseConfig.enable`.
    pub adaptive_protection: BTreeMap<String, OptionValue>,
    pub advanced_options: AdvancedOptions,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleAction {
    Allow,
    Deny(u16),
    Redirect,
    Throttle,
    RateBasedBan,
}

impl RuleAction {
    /// Parse the wire form returned by describe calls: `allow`, `deny(502)`, ...
    pub fn parse(v: &str) -> Option<Self> {
        match v {
            "allow" => Some(RuleAction::Allow),
            "redirect" => Some(RuleAction::Redirect),
            "throttle" => Some(RuleAction::Throttle),
            "rate_based_ban" => Some(RuleAction::RateBasedBan),
            other => {
                let status = other.strip_prefix("deny(")?.strip_suffix(')')?;
                status.parse::<u16>().ok().map(RuleAction::Deny)
            }
        }
    }
}

impl fmt::Display for RuleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleAction::Allow => f.write_str("allow"),
            RuleAction::Deny(status) => write!(f, "deny({status})"),
            RuleAction::Redirect => f.write_str("redirect"),
            RuleAction::Throttle => f.write_str("throttle"),
            RuleAction::RateBasedBan => f.write_str("rate_based_ban"),
        }
    }
}

/// Match criteria of a rule: a versioned IP-list match or a free-form expression.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MatchSpec {
    VersionedExpr {
        /// `SRC_IPS_V1`; `None` checks only the IP list.
        versioned_expr: Option<String>,
        src_ip_ranges: Vec<String>,
    },
    /// Compared verbatim, trailing newline included.
    Expr { expression: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThresholdSpec {
    pub count: Option<String>,
    pub interval_sec: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RateLimitSpec {
    pub conform_action: Option<String>,
    pub exceed_action: Option<String>,
    /// `Some("")` expects the key to be unset.
    pub enforce_on_key: Option<String>,
    pub rate_limit_threshold: Option<ThresholdSpec>,
    pub ban_duration_sec: Option<String>,
    pub ban_threshold: Option<ThresholdSpec>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RedirectSpec {
    pub redirect_type: Option<String>,
    pub target: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleSpec {
    pub priority: u32,
    pub action: RuleAction,
    pub description: Option<String>,
    pub matcher: Option<MatchSpec>,
    pub preview: bool,
    pub rate_limit: Option<RateLimitSpec>,
    pub redirect: Option<RedirectSpec>,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SuiteError {
    #[error("duplicate rule priority {0}")]
    DuplicatePriority(u32),
}

/// A policy plus its rules, ordered by ascending priority.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Suite {
    pub target: Target,
    pub policy: PolicySpec,
    rules: Vec<RuleSpec>,
}

impl Suite {
    pub fn new(
        target: Target,
        policy: PolicySpec,
        mut rules: Vec<RuleSpec>,
    ) -> Result<Self, SuiteError> {
        let mut seen = BTreeSet::new();
        for rule in &rules {
            if !seen.insert(rule.priority) {
                return Err(SuiteError::DuplicatePriority(rule.priority));
            }
        }
        rules.sort_by_key(|r| r.priority);
        Ok(Self {
            target,
            policy,
            rules,
        })
    }

    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }
}
