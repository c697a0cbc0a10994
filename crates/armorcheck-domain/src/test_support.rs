use crate::describe::{Describe, DescribeError};
use crate::model::{PolicySpec, RuleAction, RuleSpec, Target};
use crate::policy::{CheckPolicy, EffectiveConfig, FailOn};
use armorcheck_types::{Severity, ids};
use serde_json::Value;
use std::collections::BTreeMap;

pub fn target() -> Target {
    Target {
        project: "proj".to_string(),
        policy: "ca-policy".to_string(),
        region: None,
    }
}

pub fn policy_spec() -> PolicySpec {
    PolicySpec {
        name: "ca-policy".to_string(),
        ..PolicySpec::default()
    }
}

pub fn rule(priority: u32, action: RuleAction) -> RuleSpec {
    RuleSpec {
        priority,
        action,
        description: None,
        matcher: None,
        preview: false,
        rate_limit: None,
        redirect: None,
    }
}

pub fn strict_config() -> EffectiveConfig {
    config_with_fail_on(FailOn::Error)
}

pub fn config_with_fail_on(fail_on: FailOn) -> EffectiveConfig {
    let checks: BTreeMap<String, CheckPolicy> = [
        ids::CHECK_POLICY_FIELDS,
        ids::CHECK_RULE_FIELDS,
        ids::CHECK_RULE_MATCH,
        ids::CHECK_RULE_RATE_LIMIT,
        ids::CHECK_RULE_REDIRECT,
        ids::CHECK_DESCRIBE_DOCUMENTS,
    ]
    .into_iter()
    .map(|id| (id.to_string(), CheckPolicy::enabled(Severity::Error)))
    .collect();

    EffectiveConfig {
        profile: "strict".to_string(),
        fail_on,
        max_findings: 200,
        checks,
    }
}

/// In-memory describer; anything not registered is `NotFound`.
#[derive(Default)]
pub struct FakeDescribe {
    policy: Option<Value>,
    rules: BTreeMap<u32, Value>,
}

impl FakeDescribe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(mut self, doc: Value) -> Self {
        self.policy = Some(doc);
        self
    }

    pub fn with_rule(mut self, priority: u32, doc: Value) -> Self {
        self.rules.insert(priority, doc);
        self
    }
}

impl Describe for FakeDescribe {
    fn describe_policy(&self, target: &Target) -> Result<Value, DescribeError> {
        self.policy.clone().ok_or_else(|| DescribeError::NotFound {
            resource: target.resource(),
        })
    }

    fn describe_rule(&self, target: &Target, priority: u32) -> Result<Value, DescribeError> {
        self.rules
            .get(&priority)
            .cloned()
            .ok_or_else(|| DescribeError::NotFound {
                resource: target.rule_resource(priority),
            })
    }
}
