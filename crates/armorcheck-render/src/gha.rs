use crate::{RenderableReport, RenderableSeverity};

/// Render findings as GitHub Actions workflow command annotations.
///
/// Format:
/// `::{level} title={subject} {field}::[{check_id}:{code}] {message}`
///
/// Findings have no source file, so the subject goes into the title.
pub fn render_github_annotations(report: &RenderableReport) -> Vec<String> {
    let mut out = Vec::new();

    for f in &report.findings {
        let level = match f.severity {
            RenderableSeverity::Error => "error",
            RenderableSeverity::Warning => "warning",
            RenderableSeverity::Info => "notice",
        };

        let title = f.location.as_ref().map(|loc| match &loc.field {
            Some(field) => format!("{} {}", loc.subject(), field),
            None => loc.subject(),
        });

        let check_id = f.check_id.as_deref().unwrap_or("armorcheck");
        let message = escape_data(&format!("[{}:{}] {}", check_id, f.code, f.message));

        match title {
            Some(t) => out.push(format!("::{} title={}::{}", level, escape_property(&t), message)),
            None => out.push(format!("::{}::{}", level, message)),
        }
    }

    out
}

fn escape_data(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

fn escape_property(s: &str) -> String {
    escape_data(s).replace(':', "%3A").replace(',', "%2C")
}
