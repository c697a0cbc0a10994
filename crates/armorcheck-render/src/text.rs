use crate::{RenderableReport, RenderableSeverity};

/// Test-runner style output: one line per failed assertion, then a summary.
pub fn render_text(report: &RenderableReport) -> String {
    let mut out = String::new();

    for f in &report.findings {
        let sev = match f.severity {
            RenderableSeverity::Info => "info",
            RenderableSeverity::Warning => "warning",
            RenderableSeverity::Error => "error",
        };
        out.push_str(&format!("{sev}: {}\n", f.message));
    }

    let data = &report.data;
    out.push_str(&format!(
        "{}: {} rules, {} assertions, {} findings",
        report.verdict.label(),
        data.rules_checked,
        data.assertions_checked,
        data.findings_total
    ));
    if data.findings_emitted < data.findings_total {
        out.push_str(&format!(" ({} shown)", data.findings_emitted));
    }
    out.push('\n');
    out
}
