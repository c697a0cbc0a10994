//! Stable identifiers for checks and finding codes.
//!
//! `check_id` is a dotted namespace. `code` is a short snake_case discriminator.

// Checks
pub const CHECK_POLICY_FIELDS: &str = "policy.fields";
pub const CHECK_RULE_FIELDS: &str = "rule.fields";
pub const CHECK_RULE_MATCH: &str = "rule.match";
pub const CHECK_RULE_RATE_LIMIT: &str = "rule.rate_limit";
pub const CHECK_RULE_REDIRECT: &str = "rule.redirect";
pub const CHECK_DESCRIBE_DOCUMENTS: &str = "describe.documents";

// Codes: policy.fields, rule.fields, rule.rate_limit, rule.redirect
pub const CODE_FIELD_MISMATCH: &str = "field_mismatch";

// Codes: rule.match
pub const CODE_EXPRESSION_MISMATCH: &str = "expression_mismatch";
pub const CODE_IP_RANGE_COUNT_MISMATCH: &str = "ip_range_count_mismatch";
pub const CODE_IP_RANGE_MISMATCH: &str = "ip_range_mismatch";

// Codes: describe.documents
pub const CODE_NO_DOCUMENTS: &str = "no_documents";

// Tool-level
pub const CHECK_TOOL_RUNTIME: &str = "tool.runtime";
pub const CODE_RUNTIME_ERROR: &str = "runtime_error";
