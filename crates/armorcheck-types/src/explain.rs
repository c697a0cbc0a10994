//! Explain registry for checks and codes.
//!
//! Maps check IDs and codes to human-readable explanations with remediation guidance.

use crate::ids;

/// Explanation entry for a check or code.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Short description of the check/code.
    pub title: &'static str,
    /// What the check does and why it exists.
    pub description: &'static str,
    /// How to fix violations.
    pub remediation: &'static str,
    /// Before/after suite examples.
    pub examples: ExamplePair,
}

/// Before and after suite examples.
#[derive(Debug, Clone)]
pub struct ExamplePair {
    /// Suite text that would trigger a finding against the described state.
    pub before: &'static str,
    /// Suite text that passes.
    pub after: &'static str,
}

/// Look up an explanation by check_id or code.
///
/// Returns `None` if the identifier is not recognized.
pub fn lookup_explanation(identifier: &str) -> Option<Explanation> {
    match identifier {
        // Check IDs
        ids::CHECK_POLICY_FIELDS => Some(explain_policy_fields()),
        ids::CHECK_RULE_FIELDS => Some(explain_rule_fields()),
        ids::CHECK_RULE_MATCH => Some(explain_rule_match()),
        ids::CHECK_RULE_RATE_LIMIT => Some(explain_rule_rate_limit()),
        ids::CHECK_RULE_REDIRECT => Some(explain_rule_redirect()),
        ids::CHECK_DESCRIBE_DOCUMENTS => Some(explain_describe_documents()),
        ids::CHECK_TOOL_RUNTIME => Some(explain_tool_runtime()),

        // Codes
        ids::CODE_FIELD_MISMATCH => Some(explain_field_mismatch()),
        ids::CODE_EXPRESSION_MISMATCH => Some(explain_expression_mismatch()),
        ids::CODE_IP_RANGE_COUNT_MISMATCH => Some(explain_ip_range_count_mismatch()),
        ids::CODE_IP_RANGE_MISMATCH => Some(explain_ip_range_mismatch()),
        ids::CODE_NO_DOCUMENTS => Some(explain_no_documents()),
        ids::CODE_RUNTIME_ERROR => Some(explain_runtime_error()),

        _ => None,
    }
}

/// List all known check IDs.
pub fn all_check_ids() -> &'static [&'static str] {
    &[
        ids::CHECK_POLICY_FIELDS,
        ids::CHECK_RULE_FIELDS,
        ids::CHECK_RULE_MATCH,
        ids::CHECK_RULE_RATE_LIMIT,
        ids::CHECK_RULE_REDIRECT,
        ids::CHECK_DESCRIBE_DOCUMENTS,
        ids::CHECK_TOOL_RUNTIME,
    ]
}

/// List all known codes.
pub fn all_codes() -> &'static [&'static str] {
    &[
        ids::CODE_FIELD_MISMATCH,
        ids::CODE_EXPRESSION_MISMATCH,
        ids::CODE_IP_RANGE_COUNT_MISMATCH,
        ids::CODE_IP_RANGE_MISMATCH,
        ids::CODE_NO_DOCUMENTS,
        ids::CODE_RUNTIME_ERROR,
    ]
}

// --- Check-level explanations ---

fn explain_policy_fields() -> Explanation {
    Explanation {
        title: "Security Policy Fields",
        description: "\
Compares the described security policy against the `[policy]` table of the suite.

Checked fields (only when the suite sets them):
- name (defaults to the policy name taken from the provisioning outputs)
- description
- type (CLOUD_ARMOR, CLOUD_ARMOR_EDGE, CLOUD_ARMOR_NETWORK)
- advancedOptionsConfig.jsonParsing / advancedOptionsConfig.logLevel
- adaptiveProtectionConfig.* entries

A mismatch usually means the Terraform module input did not reach the policy,
or the suite still describes an older revision of the configuration.",
        remediation: "\
Compare the `expected` and `observed` values in the finding data:
- If the deployed value is wrong, fix the module input and re-apply.
- If the suite is stale, update the expectation in the suite file.",
        examples: ExamplePair {
            before: r#"[policy]
type = "CLOUD_ARMOR_EDGE"   # policy was deployed as CLOUD_ARMOR"#,
            after: r#"[policy]
type = "CLOUD_ARMOR""#,
        },
    }
}

fn explain_rule_fields() -> Explanation {
    Explanation {
        title: "Security Policy Rule Fields",
        description: "\
Compares the scalar fields of one rule, looked up by priority: action,
description and preview.

Actions use their wire form: `allow`, `deny(403)`, `deny(502)`, `redirect`,
`throttle`, `rate_based_ban`. An empty expected description only passes when the
rule has no description.",
        remediation: "\
Check that the rule at this priority is the one you intended to describe; a
shifted priority makes every field mismatch at once. Then align the deployed
value or the expectation.",
        examples: ExamplePair {
            before: r#"[[rules]]
priority = 2
action = "deny(502)"   # rule was deployed as throttle
preview = true"#,
            after: r#"[[rules]]
priority = 2
action = "throttle"
preview = true"#,
        },
    }
}

fn explain_rule_match() -> Explanation {
    Explanation {
        title: "Security Policy Rule Match",
        description: "\
Compares the match criteria of a rule.

- Versioned expressions (`SRC_IPS_V1`) compare the version label and the
  `match.config.srcIpRanges` list. The list is order-sensitive and compared as
  exact strings: `1.2.3.4` and `1.2.3.4/32` are different values. When the
  lengths differ, only the count is reported.
- Free-form expressions compare `match.expr.expression` verbatim, including a
  trailing newline written by heredoc-style Terraform inputs.",
        remediation: "\
Copy the observed expression from the finding data when the deployed rule is
correct. Keep trailing newlines: write the expectation with `\\n` or use a TOML
multi-line string.",
        examples: ExamplePair {
            before: r#"[[rules]]
priority = 21
expression = "'[US,AU,BE]'.contains(origin.region_code)""#,
            after: r#"[[rules]]
priority = 21
expression = "'[US,AU,BE]'.contains(origin.region_code)\n""#,
        },
    }
}

fn explain_rule_rate_limit() -> Explanation {
    Explanation {
        title: "Security Policy Rule Rate Limit Options",
        description: "\
Compares `rateLimitOptions` of throttle and rate_based_ban rules: conform and
exceed actions, enforce-on-key, the rate limit threshold, and the optional ban
duration and ban threshold.

Only options present in the suite are checked. `enforce_on_key = \"\"` is a real
expectation: it passes only when the rule has no key configured.",
        remediation: "\
Align the module's rate limit inputs with the suite, or drop options from the
suite that the test should not pin.",
        examples: ExamplePair {
            before: r#"[rules.rate_limit]
ban_duration_sec = "300"   # deployed with 120"#,
            after: r#"[rules.rate_limit]
ban_duration_sec = "120""#,
        },
    }
}

fn explain_rule_redirect() -> Explanation {
    Explanation {
        title: "Security Policy Rule Redirect Options",
        description: "\
Compares `redirectOptions` of redirect rules: the redirect type
(`GOOGLE_RECAPTCHA` or `EXTERNAL_302`) and, when set, the external target.",
        remediation: "\
Make sure the rule action is `redirect` and the redirect type matches the
module input.",
        examples: ExamplePair {
            before: r#"[rules.redirect]
type = "EXTERNAL_302""#,
            after: r#"[rules.redirect]
type = "GOOGLE_RECAPTCHA""#,
        },
    }
}

fn explain_describe_documents() -> Explanation {
    Explanation {
        title: "Describe Documents",
        description: "\
Guards against vacuous passes: a describe call that returns an empty JSON array
would otherwise check nothing.",
        remediation: "\
Verify the policy name, project and region outputs point at the provisioned
resource.",
        examples: ExamplePair {
            before: r#"[target]
policy_output = "policy_name"   # output is empty or stale"#,
            after: r#"[target]
policy_output = "policy_name""#,
        },
    }
}

fn explain_tool_runtime() -> Explanation {
    Explanation {
        title: "Tool Runtime Error",
        description: "\
Armorcheck could not complete the run: the suite failed to load, a provisioning
output was missing, or a describe call failed (resource not found, gcloud
missing, invalid JSON). These abort the run instead of producing field findings.",
        remediation: "\
Read the finding message; it carries the full error chain. Re-run with
`--log-level debug` to see every gcloud invocation.",
        examples: ExamplePair {
            before: "armorcheck verify --suite suite.toml   # no outputs given",
            after: "armorcheck verify --suite suite.toml --outputs outputs.json",
        },
    }
}

// --- Code-level explanations ---

fn explain_field_mismatch() -> Explanation {
    let mut exp = explain_rule_fields();
    exp.title = "Field Mismatch";
    exp
}

fn explain_expression_mismatch() -> Explanation {
    let mut exp = explain_rule_match();
    exp.title = "Expression Mismatch";
    exp
}

fn explain_ip_range_count_mismatch() -> Explanation {
    Explanation {
        title: "IP Range Count Mismatch",
        description: "\
The rule matches a different number of source IP ranges than the suite lists.
Element comparison is skipped because index alignment is meaningless once the
lengths differ.",
        remediation: "\
List exactly the ranges configured for the rule, in the order the API returns
them.",
        examples: ExamplePair {
            before: r#"src_ip_ranges = ["190.217.68.212", "45.116.227.69"]   # one deployed"#,
            after: r#"src_ip_ranges = ["190.217.68.212"]"#,
        },
    }
}

fn explain_ip_range_mismatch() -> Explanation {
    Explanation {
        title: "IP Range Mismatch",
        description: "\
An IP range at a given index differs from the expectation. Ranges are compared
as exact strings; no CIDR normalization is applied.",
        remediation: "\
Use the literal form the API returns (with or without a `/32` suffix) and keep
the order.",
        examples: ExamplePair {
            before: r#"src_ip_ranges = ["45.116.227.70", "190.217.68.213/32"]"#,
            after: r#"src_ip_ranges = ["45.116.227.70", "190.217.68.213"]"#,
        },
    }
}

fn explain_no_documents() -> Explanation {
    let mut exp = explain_describe_documents();
    exp.title = "No Documents";
    exp
}

fn explain_runtime_error() -> Explanation {
    let mut exp = explain_tool_runtime();
    exp.title = "Runtime Error";
    exp
}
