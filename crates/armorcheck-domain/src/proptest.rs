//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Verification being a pure function of the describe output
//! - IP range comparison being order- and length-sensitive
//! - Findings ordering and truncation

use crate::model::{MatchSpec, RateLimitSpec, RuleAction, RuleSpec, Suite};
use crate::test_support::{FakeDescribe, policy_spec, rule, strict_config, target};
use crate::verify::{verify_rule, verify_suite};
use armorcheck_types::ids;
use proptest::prelude::*;
use serde_json::json;

// ============================================================================
// Strategies
// ============================================================================

fn arb_ipv4() -> impl Strategy<Value = String> {
    (1u8..=254, any::<u8>(), any::<u8>(), 1u8..=254)
        .prop_map(|(a, b, c, d)| format!("{a}.{b}.{c}.{d}"))
}

fn arb_ip_list() -> impl Strategy<Value = Vec<String>> {
    prop::collection::btree_set(arb_ipv4(), 1..6).prop_map(|s| s.into_iter().collect())
}

fn arb_action() -> impl Strategy<Value = RuleAction> {
    prop_oneof![
        Just(RuleAction::Allow),
        Just(RuleAction::Deny(403)),
        Just(RuleAction::Deny(502)),
        Just(RuleAction::Redirect),
        Just(RuleAction::Throttle),
        Just(RuleAction::RateBasedBan),
    ]
}

fn ip_rule(priority: u32, ranges: Vec<String>) -> RuleSpec {
    RuleSpec {
        matcher: Some(MatchSpec::VersionedExpr {
            versioned_expr: Some("SRC_IPS_V1".to_string()),
            src_ip_ranges: ranges,
        }),
        ..rule(priority, RuleAction::Deny(502))
    }
}

fn ip_doc(ranges: &[String]) -> serde_json::Value {
    json!({
        "action": "deny(502)",
        "preview": false,
        "match": { "versionedExpr": "SRC_IPS_V1", "config": { "srcIpRanges": ranges } }
    })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn identical_ip_lists_pass(ranges in arb_ip_list()) {
        let describe = FakeDescribe::new().with_rule(11, ip_doc(&ranges));
        let report = verify_rule(&target(), 11, &ip_rule(11, ranges), &describe, &strict_config())
            .expect("verify");
        prop_assert!(report.is_clean());
    }

    #[test]
    fn reversed_ip_lists_fail(ranges in arb_ip_list().prop_filter("need two", |r| r.len() >= 2)) {
        let mut observed = ranges.clone();
        observed.reverse();
        let describe = FakeDescribe::new().with_rule(11, ip_doc(&observed));
        let report = verify_rule(&target(), 11, &ip_rule(11, ranges), &describe, &strict_config())
            .expect("verify");
        prop_assert!(!report.is_clean());
        prop_assert!(report.findings.iter().all(|f| f.code == ids::CODE_IP_RANGE_MISMATCH));
    }

    #[test]
    fn length_mismatch_is_a_single_count_finding(
        ranges in arb_ip_list(),
        extra in arb_ipv4(),
    ) {
        let mut observed = ranges.clone();
        observed.push(extra);
        let describe = FakeDescribe::new().with_rule(11, ip_doc(&observed));
        let report = verify_rule(&target(), 11, &ip_rule(11, ranges), &describe, &strict_config())
            .expect("verify");
        prop_assert_eq!(report.findings.len(), 1);
        prop_assert_eq!(report.findings[0].code.as_str(), ids::CODE_IP_RANGE_COUNT_MISMATCH);
    }

    #[test]
    fn verification_is_idempotent(
        expected in arb_action(),
        observed in arb_action(),
        key in prop_oneof![Just(String::new()), Just("ALL".to_string()), Just("IP".to_string())],
    ) {
        let spec = RuleSpec {
            rate_limit: Some(RateLimitSpec {
                enforce_on_key: Some("ALL".to_string()),
                ..RateLimitSpec::default()
            }),
            ..rule(4, expected)
        };
        let describe = FakeDescribe::new().with_rule(4, json!({
            "action": observed.to_string(),
            "rateLimitOptions": { "enforceOnKey": key },
        }));
        let cfg = strict_config();
        let first = verify_rule(&target(), 4, &spec, &describe, &cfg).expect("verify");
        let second = verify_rule(&target(), 4, &spec, &describe, &cfg).expect("verify");
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.is_clean(), expected == observed && key == "ALL");
    }

    #[test]
    fn findings_are_ordered_by_priority(
        priorities in prop::collection::btree_set(1u32..1000, 1..8),
        max in 1usize..20,
    ) {
        let rules: Vec<RuleSpec> = priorities.iter().map(|p| rule(*p, RuleAction::Allow)).collect();
        let suite = Suite::new(target(), policy_spec(), rules).expect("suite");
        let mut describe = FakeDescribe::new().with_policy(json!({ "name": "drifted" }));
        for p in &priorities {
            describe = describe.with_rule(*p, json!({ "action": "throttle", "preview": false }));
        }
        let mut cfg = strict_config();
        cfg.max_findings = max;
        let report = verify_suite(&suite, &describe, &cfg).expect("verify");

        let keys: Vec<u64> = report
            .findings
            .iter()
            .map(|f| f.location.as_ref().and_then(|l| l.priority).map_or(0, |p| u64::from(p) + 1))
            .collect();
        prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(report.data.findings_total as usize, priorities.len() + 1);
        prop_assert!(report.findings.len() <= max);
    }
}
