//! Flatten expected specs into comparison tables.
//!
//! Each check contributes rows; a single routine in `compare` diffs the rows
//! against observed documents. Rows of disabled checks are dropped here.

use crate::model::{PolicySpec, RuleSpec};
use crate::policy::EffectiveConfig;
use armorcheck_types::FieldPath;

mod policy_fields;
mod rate_limit;
mod redirect;
mod rule_fields;
mod rule_match;

/// Expected value of one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expected {
    /// Exact string equality against the text view.
    Text(String),
    /// Equality against the boolean view.
    Flag(bool),
    /// Length first, then element-wise by index.
    Sequence(Vec<String>),
}

/// One row of a comparison table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expectation {
    pub check_id: &'static str,
    /// Code for a scalar mismatch; sequences use the IP range codes.
    pub code: &'static str,
    pub field: FieldPath,
    pub expected: Expected,
}

impl Expectation {
    pub fn text(check_id: &'static str, code: &'static str, field: &str, v: &str) -> Self {
        Self {
            check_id,
            code,
            field: FieldPath::new(field),
            expected: Expected::Text(v.to_string()),
        }
    }

    pub fn flag(check_id: &'static str, code: &'static str, field: &str, v: bool) -> Self {
        Self {
            check_id,
            code,
            field: FieldPath::new(field),
            expected: Expected::Flag(v),
        }
    }
}

pub fn policy_expectations(spec: &PolicySpec, cfg: &EffectiveConfig) -> Vec<Expectation> {
    let mut rows = Vec::new();
    policy_fields::expectations(spec, &mut rows);
    retain_enabled(rows, cfg)
}

pub fn rule_expectations(spec: &RuleSpec, cfg: &EffectiveConfig) -> Vec<Expectation> {
    let mut rows = Vec::new();
    rule_fields::expectations(spec, &mut rows);
    rule_match::expectations(spec, &mut rows);
    rate_limit::expectations(spec, &mut rows);
    redirect::expectations(spec, &mut rows);
    retain_enabled(rows, cfg)
}

fn retain_enabled(mut rows: Vec<Expectation>, cfg: &EffectiveConfig) -> Vec<Expectation> {
    rows.retain(|row| cfg.check_policy(row.check_id).is_some());
    rows
}
