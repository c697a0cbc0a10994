use super::Expectation;
use crate::model::RuleSpec;
use armorcheck_types::ids;

const CHECK: &str = ids::CHECK_RULE_REDIRECT;
const CODE: &str = ids::CODE_FIELD_MISMATCH;

pub fn expectations(spec: &RuleSpec, out: &mut Vec<Expectation>) {
    let Some(redirect) = &spec.redirect else {
        return;
    };

    if let Some(kind) = &redirect.redirect_type {
        out.push(Expectation::text(CHECK, CODE, "redirectOptions.type", kind));
    }
    if let Some(target) = &redirect.target {
        out.push(Expectation::text(
            CHECK,
            CODE,
            "redirectOptions.target",
            target,
        ));
    }
}
