//! The `explain` use case: look up check/code documentation.

use armorcheck_types::explain::{self, Explanation};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdentifierKind {
    Check,
    Code,
}

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found {
        identifier: String,
        kind: IdentifierKind,
        explanation: Explanation,
    },
    /// Unknown identifier; carries near matches plus everything available.
    NotFound {
        identifier: String,
        suggestions: Vec<&'static str>,
        available_check_ids: &'static [&'static str],
        available_codes: &'static [&'static str],
    },
}

/// Look up an explanation for a check_id or code.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    let identifier = identifier.trim();
    let check_ids = explain::all_check_ids();
    let codes = explain::all_codes();

    match explain::lookup_explanation(identifier) {
        Some(explanation) => ExplainOutput::Found {
            identifier: identifier.to_string(),
            kind: if check_ids.contains(&identifier) {
                IdentifierKind::Check
            } else {
                IdentifierKind::Code
            },
            explanation,
        },
        None => {
            let needle = identifier.to_ascii_lowercase();
            let suggestions = check_ids
                .iter()
                .chain(codes.iter())
                .copied()
                .filter(|known| {
                    !needle.is_empty() && (known.contains(&needle) || needle.contains(known))
                })
                .collect();
            ExplainOutput::NotFound {
                identifier: identifier.to_string(),
                suggestions,
                available_check_ids: check_ids,
                available_codes: codes,
            }
        }
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(identifier: &str, kind: IdentifierKind, exp: &Explanation) -> String {
    let mut out = String::new();
    let label = match kind {
        IdentifierKind::Check => "check",
        IdentifierKind::Code => "code",
    };

    out.push_str(&format!("{} ({label} `{identifier}`)\n", exp.title));
    out.push_str(&"=".repeat(exp.title.len()));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\nRemediation\n-----------\n");
    out.push_str(exp.remediation);
    out.push_str("\n\nExamples\n--------\n\n");
    example(&mut out, "Before (finding):", exp.examples.before);
    out.push('\n');
    example(&mut out, "After (passing):", exp.examples.after);

    out
}

fn example(out: &mut String, heading: &str, body: &str) {
    let lang = if body.starts_with("armorcheck ") {
        "console"
    } else {
        "toml"
    };
    out.push_str(&format!("{heading}\n```{lang}\n{body}\n```\n"));
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(
    identifier: &str,
    suggestions: &[&str],
    check_ids: &[&'static str],
    codes: &[&'static str],
) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown check_id or code: {}\n\n", identifier));
    if !suggestions.is_empty() {
        out.push_str(&format!("Did you mean: {}?\n\n", suggestions.join(", ")));
    }
    out.push_str("Available check_ids:\n");
    for id in check_ids {
        out.push_str(&format!("  - {}\n", id));
    }
    out.push_str("\nAvailable codes:\n");
    for code in codes {
        out.push_str(&format!("  - {}\n", code));
    }

    out
}
