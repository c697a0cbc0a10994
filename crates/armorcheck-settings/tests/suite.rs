use armorcheck_domain::model::{MatchSpec, OptionValue, PolicyType, RuleAction};
use armorcheck_domain::policy::FailOn;
use armorcheck_settings::{Overrides, build_suite, parse_suite_toml, resolve_config};
use armorcheck_types::{Severity, ids};
use std::collections::BTreeMap;

fn outputs() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("project_id".to_string(), "proj-123".to_string()),
        ("policy_name".to_string(), "ca-policy-abc".to_string()),
        ("region".to_string(), "us-central1".to_string()),
    ])
}

const SUITE: &str = r#"
schema = "armorcheck.suite.v1"

[policy]
type = "CLOUD_ARMOR"
json_parsing = "STANDARD"

[policy.adaptive_protection]
"layer7DdosDefenseConfig.enable" = true
"layer7DdosDefenseConfig.ruleVisibility" = "STANDARD"

[[rules]]
priority = 13
action = "rate_based_ban"
versioned_expr = "SRC_IPS_V1"
src_ip_ranges = ["45.116.227.70", "190.217.68.213"]

[rules.rate_limit]
conform_action = "allow"
enforce_on_key = "ALL"
ban_duration_sec = 120
rate_limit_threshold = { count = "10", interval_sec = 60 }

[[rules]]
priority = 1
action = "deny(502)"
description = ""
expression = "evaluatePreconfiguredWaf('sqli-v33-stable', {'sensitivity': 4})"
"#;

#[test]
fn suite_resolves_against_outputs() {
    let cfg = parse_suite_toml(SUITE).expect("parse");
    let suite = build_suite(&cfg, &outputs()).expect("build");

    assert_eq!(suite.target.project, "proj-123");
    assert_eq!(suite.target.policy, "ca-policy-abc");
    assert_eq!(suite.target.region, None);
    assert_eq!(suite.policy.name, "ca-policy-abc");
    assert_eq!(suite.policy.policy_type, Some(PolicyType::CloudArmor));
    assert_eq!(
        suite
            .policy
            .adaptive_protection
            .get("layer7DdosDefenseConfig.enable"),
        Some(&OptionValue::Flag(true))
    );

    let priorities: Vec<u32> = suite.rules().iter().map(|r| r.priority).collect();
    assert_eq!(priorities, vec![1, 13]);

    let [waf, ban] = suite.rules() else {
        panic!("expected two rules");
    };
    assert_eq!(waf.action, RuleAction::Deny(502));
    assert_eq!(waf.description.as_deref(), Some(""));
    assert!(matches!(waf.matcher, Some(MatchSpec::Expr { .. })));

    let rl = ban.rate_limit.as_ref().expect("rate limit");
    assert_eq!(rl.ban_duration_sec.as_deref(), Some("120"));
    let threshold = rl.rate_limit_threshold.as_ref().expect("threshold");
    assert_eq!(threshold.count.as_deref(), Some("10"));
    assert_eq!(threshold.interval_sec.as_deref(), Some("60"));
    assert_eq!(rl.exceed_action, None);
}

#[test]
fn region_output_is_used_when_named() {
    let cfg = parse_suite_toml(
        r#"
[target]
region_output = "region"
"#,
    )
    .expect("parse");
    let suite = build_suite(&cfg, &outputs()).expect("build");
    assert_eq!(suite.target.region.as_deref(), Some("us-central1"));
}

#[test]
fn literal_target_needs_no_outputs() {
    let cfg = parse_suite_toml(
        r#"
[target]
project = "demo"
policy = "edge-policy"
"#,
    )
    .expect("parse");
    let suite = build_suite(&cfg, &BTreeMap::new()).expect("build");
    assert_eq!(suite.target.policy, "edge-policy");
    assert_eq!(suite.policy.name, "edge-policy");
}

#[test]
fn missing_output_is_an_error() {
    let cfg = parse_suite_toml("").expect("parse");
    let err = build_suite(&cfg, &BTreeMap::new()).expect_err("no outputs");
    assert!(err.to_string().contains("project_id"), "{err}");
}

#[test]
fn duplicate_priority_is_rejected() {
    let cfg = parse_suite_toml(
        r#"
[[rules]]
priority = 7
action = "allow"

[[rules]]
priority = 7
action = "throttle"
"#,
    )
    .expect("parse");
    let err = build_suite(&cfg, &outputs()).expect_err("duplicate");
    assert!(err.to_string().contains("duplicate rule priority 7"), "{err}");
}

#[test]
fn invalid_rules_name_their_priority() {
    for (body, needle) in [
        (r#"action = "block""#, "unknown action"),
        (
            r#"action = "allow"
expression = "true"
src_ip_ranges = ["1.2.3.4"]"#,
            "mutually exclusive",
        ),
        (
            r#"action = "allow"
versioned_expr = "SRC_IPS_V1""#,
            "requires src_ip_ranges",
        ),
    ] {
        let cfg = parse_suite_toml(&format!("[[rules]]\npriority = 42\n{body}\n")).expect("parse");
        let err = build_suite(&cfg, &outputs()).expect_err("invalid rule");
        let chain = format!("{err:#}");
        assert!(chain.contains("priority 42"), "{chain}");
        assert!(chain.contains(needle), "{chain}");
    }
}

#[test]
fn camel_case_keys_are_rejected_by_name() {
    for (body, key) in [
        (
            "[[rules]]\npriority = 11\naction = \"allow\"\nsrcIpRanges = [\"190.210.69.12\"]\n",
            "srcIpRanges",
        ),
        (
            "[[rules]]\npriority = 13\naction = \"rate_based_ban\"\n\n[rules.rate_limit]\nbanDurationSec = 300\n",
            "banDurationSec",
        ),
        ("[policy]\njsonParsing = \"STANDARD\"\n", "jsonParsing"),
        ("[target]\nproject_id = \"proj\"\n", "project_id"),
    ] {
        let err = parse_suite_toml(body).expect_err("unknown key");
        let chain = format!("{err:#}");
        assert!(chain.contains(key), "{chain}");
    }
}

#[test]
fn unknown_policy_type_is_rejected() {
    let cfg = parse_suite_toml("[policy]\ntype = \"CLOUD_ARMOUR\"\n").expect("parse");
    assert!(build_suite(&cfg, &outputs()).is_err());
}

#[test]
fn foreign_schema_is_rejected() {
    assert!(parse_suite_toml("schema = \"other.config.v1\"\n").is_err());
}

#[test]
fn profiles_and_overrides() {
    let cfg = parse_suite_toml(
        r#"
profile = "warn"
max_findings = 5

[checks."rule.redirect"]
enabled = false

[checks."policy.fields"]
severity = "info"
"#,
    )
    .expect("parse");

    let resolved = resolve_config(&cfg, Overrides::default()).expect("resolve");
    let eff = resolved.effective;
    assert_eq!(eff.profile, "warn");
    assert_eq!(eff.fail_on, FailOn::Warning);
    assert_eq!(eff.max_findings, 5);
    assert!(eff.check_policy(ids::CHECK_RULE_REDIRECT).is_none());
    assert_eq!(
        eff.check_policy(ids::CHECK_POLICY_FIELDS).map(|p| p.severity),
        Some(Severity::Info)
    );
    assert_eq!(
        eff.check_policy(ids::CHECK_RULE_MATCH).map(|p| p.severity),
        Some(Severity::Warning)
    );

    let overridden = resolve_config(
        &cfg,
        Overrides {
            profile: Some("audit".to_string()),
            max_findings: Some(1),
        },
    )
    .expect("resolve");
    assert_eq!(overridden.effective.fail_on, FailOn::Never);
    assert_eq!(overridden.effective.max_findings, 1);
}

#[test]
fn unknown_profile_and_severity_are_errors() {
    let bad_profile = parse_suite_toml("profile = \"lenient\"\n").expect("parse");
    assert!(resolve_config(&bad_profile, Overrides::default()).is_err());

    let bad_severity =
        parse_suite_toml("[checks.\"rule.fields\"]\nseverity = \"fatal\"\n").expect("parse");
    assert!(resolve_config(&bad_severity, Overrides::default()).is_err());

    let bad_check =
        parse_suite_toml("[checks.\"rule.matches\"]\nenabled = false\n").expect("parse");
    let err = resolve_config(&bad_check, Overrides::default()).expect_err("unknown check");
    assert!(err.to_string().contains("rule.matches"));
}

#[test]
fn bundled_suites_build() {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("suites");
    let expected_rules = [
        ("all.toml", 14),
        ("complete.toml", 8),
        ("edge.toml", 1),
        ("enterprise.toml", 2),
        ("recaptcha.toml", 0),
        ("regional.toml", 1),
        ("simple.toml", 0),
    ];

    for (file, rules) in expected_rules {
        let text = std::fs::read_to_string(dir.join(file)).expect("read bundled suite");
        let cfg = parse_suite_toml(&text).unwrap_or_else(|e| panic!("{file}: {e:#}"));
        resolve_config(&cfg, Overrides::default()).unwrap_or_else(|e| panic!("{file}: {e:#}"));
        let suite = build_suite(&cfg, &outputs()).unwrap_or_else(|e| panic!("{file}: {e:#}"));
        assert_eq!(suite.rules().len(), rules, "{file}");
    }
}

#[test]
fn bundled_edge_suite_keeps_trailing_newline() {
    let path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../suites/edge.toml");
    let text = std::fs::read_to_string(path).expect("read edge suite");
    let suite = build_suite(&parse_suite_toml(&text).expect("parse"), &outputs()).expect("build");

    assert_eq!(
        suite.rules()[0].matcher,
        Some(MatchSpec::Expr {
            expression: "origin.region_code == \"US\"\n".to_string()
        })
    );
}
