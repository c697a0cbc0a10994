use super::Expectation;
use crate::model::RuleSpec;
use armorcheck_types::ids;

const CHECK: &str = ids::CHECK_RULE_FIELDS;
const CODE: &str = ids::CODE_FIELD_MISMATCH;

pub fn expectations(spec: &RuleSpec, out: &mut Vec<Expectation>) {
    out.push(Expectation::text(
        CHECK,
        CODE,
        "action",
        &spec.action.to_string(),
    ));
    if let Some(description) = &spec.description {
        out.push(Expectation::text(CHECK, CODE, "description", description));
    }
    out.push(Expectation::flag(CHECK, CODE, "preview", spec.preview));
}
