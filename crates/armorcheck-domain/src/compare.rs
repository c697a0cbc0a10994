//! The one comparator: diff a table of expectations against an observed document.

use crate::checks::{Expectation, Expected};
use crate::fingerprint::fingerprint_for_field;
use crate::observed::ObservedDoc;
use crate::policy::EffectiveConfig;
use armorcheck_types::{Finding, Location, Severity, ids};
use serde_json::{Value, json};

/// What is being compared: the policy (`priority == None`) or one of its rules.
#[derive(Clone, Copy, Debug)]
pub struct Subject<'a> {
    pub policy: &'a str,
    pub priority: Option<u32>,
}

impl Subject<'_> {
    fn location(&self, exp: &Expectation) -> Location {
        match self.priority {
            Some(p) => Location::rule(self.policy, p, Some(exp.field.clone())),
            None => Location::policy(self.policy, Some(exp.field.clone())),
        }
    }
}

/// Compare every row; never stops at the first mismatch.
///
/// `doc_index` is set when the describe call returned several documents.
/// Returns the number of assertions evaluated.
pub fn diff(
    doc: &ObservedDoc,
    doc_index: Option<usize>,
    rows: &[Expectation],
    subject: Subject<'_>,
    cfg: &EffectiveConfig,
    out: &mut Vec<Finding>,
) -> u32 {
    let mut assertions = 0;

    for row in rows {
        let severity = cfg
            .check_policy(row.check_id)
            .map(|p| p.severity)
            .unwrap_or(Severity::Error);
        let mut emit = |code: &'static str, message: String, index: Option<usize>, data: Value| {
            out.push(finding(
                subject, row, severity, code, message, index, doc_index, data,
            ));
        };

        match &row.expected {
            Expected::Text(expected) => {
                assertions += 1;
                let observed = doc.text(&row.field);
                if &observed != expected {
                    emit(
                        row.code,
                        format!("expected {expected:?}, found {observed:?}"),
                        None,
                        json!({ "expected": expected, "observed": observed }),
                    );
                }
            }
            Expected::Flag(expected) => {
                assertions += 1;
                let observed = doc.flag(&row.field);
                if observed != *expected {
                    emit(
                        row.code,
                        format!("expected {expected}, found {observed}"),
                        None,
                        json!({ "expected": expected, "observed": observed }),
                    );
                }
            }
            Expected::Sequence(expected) => {
                assertions += 1;
                let observed = doc.sequence(&row.field);
                if observed.len() != expected.len() {
                    emit(
                        ids::CODE_IP_RANGE_COUNT_MISMATCH,
                        format!(
                            "expected {} IP ranges, found {}",
                            expected.len(),
                            observed.len()
                        ),
                        None,
                        json!({
                            "expected_count": expected.len(),
                            "observed_count": observed.len(),
                            "expected": expected,
                            "observed": observed,
                        }),
                    );
                    continue;
                }
                for (i, (want, got)) in expected.iter().zip(observed.iter()).enumerate() {
                    assertions += 1;
                    if want != got {
                        emit(
                            row.code,
                            format!("[{i}] expected {want:?}, found {got:?}"),
                            Some(i),
                            json!({ "index": i, "expected": want, "observed": got }),
                        );
                    }
                }
            }
        }
    }

    assertions
}

#[allow(clippy::too_many_arguments)]
fn finding(
    subject: Subject<'_>,
    row: &Expectation,
    severity: Severity,
    code: &'static str,
    detail: String,
    index: Option<usize>,
    doc_index: Option<usize>,
    mut data: Value,
) -> Finding {
    let location = subject.location(row);
    let message = format!("{}: {}: {}", location.subject_label(), row.field, detail);
    if let (Some(d), Some(obj)) = (doc_index, data.as_object_mut()) {
        obj.insert("document".to_string(), json!(d));
    }
    Finding {
        severity,
        check_id: row.check_id.to_string(),
        code: code.to_string(),
        message,
        location: Some(location),
        help: Some(help_for(row.check_id).to_string()),
        fingerprint: Some(fingerprint_for_field(
            row.check_id,
            code,
            subject.policy,
            subject.priority,
            row.field.as_str(),
            index,
            doc_index,
        )),
        data,
    }
}

fn help_for(check_id: &str) -> &'static str {
    match check_id {
        ids::CHECK_POLICY_FIELDS => {
            "Align the deployed policy with the suite, or update the [policy] expectation."
        }
        ids::CHECK_RULE_MATCH => {
            "Match values compare verbatim: keep order, CIDR suffixes and trailing newlines."
        }
        ids::CHECK_RULE_RATE_LIMIT => {
            "Only rate limit options listed in the suite are checked; an empty string expects an unset value."
        }
        ids::CHECK_RULE_REDIRECT => "Check the redirect type and target of the rule.",
        _ => "Confirm the rule at this priority is the one the suite describes.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::strict_config;
    use armorcheck_types::FieldPath;

    fn rule_subject() -> Subject<'static> {
        Subject {
            policy: "ca-policy",
            priority: Some(12),
        }
    }

    #[test]
    fn text_mismatch_message_names_priority_and_field() {
        let doc = ObservedDoc::new(json!({ "rateLimitOptions": { "banDurationSec": "120" } }));
        let rows = vec![Expectation::text(
            ids::CHECK_RULE_RATE_LIMIT,
            ids::CODE_FIELD_MISMATCH,
            "rateLimitOptions.banDurationSec",
            "300",
        )];
        let mut out = Vec::new();
        let n = diff(&doc, None, &rows, rule_subject(), &strict_config(), &mut out);

        assert_eq!(n, 1);
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].message,
            r#"priority 12: rateLimitOptions.banDurationSec: expected "300", found "120""#
        );
        assert_eq!(out[0].data["expected"], "300");
        assert_eq!(out[0].data["observed"], "120");
        assert!(out[0].data.get("document").is_none());
    }

    #[test]
    fn sequence_count_mismatch_skips_elements() {
        let doc = ObservedDoc::new(json!({
            "match": { "config": { "srcIpRanges": ["190.217.68.212"] } }
        }));
        let rows = vec![Expectation {
            check_id: ids::CHECK_RULE_MATCH,
            code: ids::CODE_IP_RANGE_MISMATCH,
            field: FieldPath::new("match.config.srcIpRanges"),
            expected: Expected::Sequence(vec![
                "190.217.68.212".to_string(),
                "45.116.227.69".to_string(),
            ]),
        }];
        let mut out = Vec::new();
        diff(&doc, None, &rows, rule_subject(), &strict_config(), &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].code, ids::CODE_IP_RANGE_COUNT_MISMATCH);
        assert!(out[0].message.ends_with("expected 2 IP ranges, found 1"));
    }

    #[test]
    fn sequence_elements_compare_by_index() {
        let doc = ObservedDoc::new(json!({
            "match": { "config": { "srcIpRanges": ["45.116.227.69", "190.217.68.212"] } }
        }));
        let rows = vec![Expectation {
            check_id: ids::CHECK_RULE_MATCH,
            code: ids::CODE_IP_RANGE_MISMATCH,
            field: FieldPath::new("match.config.srcIpRanges"),
            expected: Expected::Sequence(vec![
                "190.217.68.212".to_string(),
                "45.116.227.69".to_string(),
            ]),
        }];
        let mut out = Vec::new();
        let n = diff(&doc, Some(0), &rows, rule_subject(), &strict_config(), &mut out);

        assert_eq!(n, 3);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].data["index"], 0);
        assert_eq!(out[1].data["index"], 1);
        assert_eq!(out[0].data["document"], 0);
        assert_ne!(out[0].fingerprint, out[1].fingerprint);
    }

    #[test]
    fn flag_mismatch_treats_missing_as_false() {
        let doc = ObservedDoc::new(json!({}));
        let rows = vec![
            Expectation::flag(ids::CHECK_RULE_FIELDS, ids::CODE_FIELD_MISMATCH, "preview", true),
            Expectation::flag(ids::CHECK_RULE_FIELDS, ids::CODE_FIELD_MISMATCH, "other", false),
        ];
        let mut out = Vec::new();
        diff(&doc, None, &rows, rule_subject(), &strict_config(), &mut out);

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].message, "priority 12: preview: expected true, found false");
    }

    #[test]
    fn policy_subject_prefix() {
        let doc = ObservedDoc::new(json!({ "type": "CLOUD_ARMOR" }));
        let rows = vec![Expectation::text(
            ids::CHECK_POLICY_FIELDS,
            ids::CODE_FIELD_MISMATCH,
            "type",
            "CLOUD_ARMOR_EDGE",
        )];
        let subject = Subject {
            policy: "ca-policy",
            priority: None,
        };
        let mut out = Vec::new();
        diff(&doc, None, &rows, subject, &strict_config(), &mut out);

        assert_eq!(
            out[0].message,
            r#"policy: type: expected "CLOUD_ARMOR_EDGE", found "CLOUD_ARMOR""#
        );
        assert_eq!(out[0].location.as_ref().and_then(|l| l.priority), None);
    }
}
