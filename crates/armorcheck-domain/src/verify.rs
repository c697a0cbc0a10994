use crate::checks::{self, Expectation};
use crate::compare::{self, Subject};
use crate::describe::{Describe, DescribeError};
use crate::fingerprint::fingerprint_for_field;
use crate::model::{PolicySpec, RuleSpec, Suite, Target};
use crate::observed::documents;
use crate::policy::{EffectiveConfig, FailOn};
use crate::report::{DomainReport, Report, SeverityCounts};
use armorcheck_types::{ArmorcheckData, Finding, Location, Severity, Verdict, ids};
use serde_json::{Value, json};

/// Describe the policy and compare its fields against `expected`.
///
/// Field mismatches are findings; only a failed describe call is an error.
pub fn verify_policy(
    expected: &PolicySpec,
    target: &Target,
    describe: &dyn Describe,
    cfg: &EffectiveConfig,
) -> Result<Report, DescribeError> {
    let observed = describe.describe_policy(target)?;
    let rows = checks::policy_expectations(expected, cfg);
    let subject = Subject {
        policy: &target.policy,
        priority: None,
    };
    Ok(compare_documents(observed, &rows, subject, cfg))
}

/// Describe the rule at `priority` and compare it against `expected`.
pub fn verify_rule(
    target: &Target,
    priority: u32,
    expected: &RuleSpec,
    describe: &dyn Describe,
    cfg: &EffectiveConfig,
) -> Result<Report, DescribeError> {
    let observed = describe.describe_rule(target, priority)?;
    let rows = checks::rule_expectations(expected, cfg);
    let subject = Subject {
        policy: &target.policy,
        priority: Some(priority),
    };
    Ok(compare_documents(observed, &rows, subject, cfg))
}

/// Verify the policy, then every rule in ascending priority.
///
/// The first describe failure aborts the run; mismatches never do.
pub fn verify_suite(
    suite: &Suite,
    describe: &dyn Describe,
    cfg: &EffectiveConfig,
) -> Result<DomainReport, DescribeError> {
    let mut combined = verify_policy(&suite.policy, &suite.target, describe, cfg)?;

    for rule in suite.rules() {
        let report = verify_rule(&suite.target, rule.priority, rule, describe, cfg)?;
        combined.merge(report);
    }

    let Report {
        mut findings,
        documents,
        assertions,
    } = combined;

    // Policy first, then ascending priority; table order within a subject.
    findings.sort_by_key(|f| {
        f.location
            .as_ref()
            .and_then(|l| l.priority)
            .map_or(0u64, |p| u64::from(p) + 1)
    });

    let total = findings.len() as u32;
    let verdict = compute_verdict(&findings, cfg.fail_on);
    let mut emitted = findings;
    let mut truncated_reason: Option<String> = None;
    if emitted.len() > cfg.max_findings {
        emitted.truncate(cfg.max_findings);
        truncated_reason = Some(format!(
            "findings truncated to max_findings={}",
            cfg.max_findings
        ));
    }

    let counts = SeverityCounts::from_findings(&emitted);

    let data = ArmorcheckData {
        profile: cfg.profile.clone(),
        project: suite.target.project.clone(),
        policy: suite.target.policy.clone(),
        region: suite.target.region.clone(),
        rules_checked: suite.rules().len() as u32,
        documents_checked: documents,
        assertions_checked: assertions,
        findings_total: total,
        findings_emitted: emitted.len() as u32,
        truncated_reason,
    };

    Ok(DomainReport {
        verdict,
        findings: emitted,
        data,
        counts,
    })
}

fn compare_documents(
    observed: Value,
    rows: &[Expectation],
    subject: Subject<'_>,
    cfg: &EffectiveConfig,
) -> Report {
    let docs = documents(observed);
    let mut report = Report::default();

    if docs.is_empty() {
        if let Some(policy) = cfg.check_policy(ids::CHECK_DESCRIBE_DOCUMENTS) {
            report.findings.push(no_documents(subject, policy.severity));
        }
        return report;
    }

    let multi = docs.len() > 1;
    for (i, doc) in docs.iter().enumerate() {
        let index = multi.then_some(i);
        report.assertions += compare::diff(doc, index, rows, subject, cfg, &mut report.findings);
        report.documents += 1;
    }
    report
}

fn no_documents(subject: Subject<'_>, severity: Severity) -> Finding {
    let location = match subject.priority {
        Some(p) => Location::rule(subject.policy, p, None),
        None => Location::policy(subject.policy, None),
    };
    Finding {
        severity,
        check_id: ids::CHECK_DESCRIBE_DOCUMENTS.to_string(),
        code: ids::CODE_NO_DOCUMENTS.to_string(),
        message: format!(
            "{}: describe returned no documents",
            location.subject_label()
        ),
        location: Some(location),
        help: Some("Check the project, policy and region the suite targets.".to_string()),
        fingerprint: Some(fingerprint_for_field(
            ids::CHECK_DESCRIBE_DOCUMENTS,
            ids::CODE_NO_DOCUMENTS,
            subject.policy,
            subject.priority,
            "",
            None,
            None,
        )),
        data: json!({ "documents": 0 }),
    }
}

fn compute_verdict(findings: &[Finding], fail_on: FailOn) -> Verdict {
    let has_error = findings.iter().any(|f| f.severity == Severity::Error);
    let has_warn = findings.iter().any(|f| f.severity == Severity::Warning);

    match fail_on {
        FailOn::Never if has_error || has_warn => Verdict::Warn,
        FailOn::Never => Verdict::Pass,
        _ if has_error => Verdict::Fail,
        FailOn::Warning if has_warn => Verdict::Fail,
        _ if has_warn => Verdict::Warn,
        _ => Verdict::Pass,
    }
}
