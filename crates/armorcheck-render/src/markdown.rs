use crate::{RenderableReport, RenderableSeverity};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();
    let data = &report.data;

    out.push_str("# Armorcheck report\n\n");
    out.push_str(&format!(
        "- Policy: `{}` (project `{}`{})\n",
        data.policy,
        data.project,
        data.region
            .as_deref()
            .map(|r| format!(", region `{r}`"))
            .unwrap_or_default()
    ));
    out.push_str(&format!(
        "- Verdict: **{}**\n- Rules checked: {} ({} assertions)\n- Findings: {} (emitted) / {} (total)\n\n",
        report.verdict.label(),
        data.rules_checked,
        data.assertions_checked,
        data.findings_emitted,
        data.findings_total
    ));

    if let Some(r) = &data.truncated_reason {
        out.push_str(&format!("> Note: {}\n\n", r));
    }

    if report.findings.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    out.push_str("## Findings\n\n");
    out.push_str("| Severity | Subject | Field | Check | Message |\n");
    out.push_str("|---|---|---|---|---|\n");

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "INFO",
            RenderableSeverity::Warning => "WARN",
            RenderableSeverity::Error => "ERROR",
        };
        let (subject, field) = match &f.location {
            Some(loc) => (loc.subject(), loc.field.clone().unwrap_or_default()),
            None => (String::new(), String::new()),
        };
        out.push_str(&format!(
            "| {} | {} | `{}` | `{}` / `{}` | {} |\n",
            sev,
            subject,
            field,
            f.check_id.as_deref().unwrap_or(""),
            f.code,
            cell(&f.message)
        ));
    }

    let mut helps: Vec<&str> = report
        .findings
        .iter()
        .filter_map(|f| f.help.as_deref())
        .collect();
    helps.sort_unstable();
    helps.dedup();
    if !helps.is_empty() {
        out.push_str("\n### Help\n\n");
        for help in helps {
            out.push_str(&format!("- {}\n", help));
        }
    }

    out
}

/// Table cells cannot hold raw pipes or newlines.
fn cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        RenderableData, RenderableFinding, RenderableLocation, RenderableSeverity,
        RenderableVerdictStatus,
    };

    #[test]
    fn renders_empty_report() {
        let report = RenderableReport {
            verdict: RenderableVerdictStatus::Pass,
            findings: Vec::new(),
            data: RenderableData {
                project: "proj".to_string(),
                policy: "ca-policy".to_string(),
                rules_checked: 14,
                ..RenderableData::default()
            },
        };
        let md = render_markdown(&report);
        assert!(md.contains("# Armorcheck report"));
        assert!(md.contains("Policy: `ca-policy` (project `proj`)"));
        assert!(md.contains("Rules checked: 14"));
        assert!(md.contains("No findings"));
    }

    #[test]
    fn renders_findings_with_subject_help_and_truncation() {
        let report = RenderableReport {
            verdict: RenderableVerdictStatus::Fail,
            findings: vec![RenderableFinding {
                severity: RenderableSeverity::Error,
                check_id: Some("rule.match".to_string()),
                code: "expression_mismatch".to_string(),
                message: "priority 21: match.expr.expression: expected \"a|b\\n\", found \"\""
                    .to_string(),
                location: Some(RenderableLocation {
                    policy: "ca-policy".to_string(),
                    priority: Some(21),
                    field: Some("match.expr.expression".to_string()),
                }),
                help: Some("keep trailing newlines".to_string()),
            }],
            data: RenderableData {
                project: "proj".to_string(),
                policy: "ca-policy".to_string(),
                region: Some("us-central1".to_string()),
                findings_emitted: 1,
                findings_total: 2,
                truncated_reason: Some("truncated".to_string()),
                ..RenderableData::default()
            },
        };

        let md = render_markdown(&report);
        assert!(md.contains("region `us-central1`"));
        assert!(md.contains("Verdict: **FAIL**"));
        assert!(md.contains("> Note: truncated"));
        assert!(md.contains("| ERROR | priority 21 | `match.expr.expression` |"));
        assert!(md.contains("a\\|b"));
        assert!(md.contains("### Help"));
        assert!(md.contains("- keep trailing newlines"));
    }
}
