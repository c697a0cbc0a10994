use super::Expectation;
use crate::model::{OptionValue, PolicySpec};
use armorcheck_types::ids;

const CHECK: &str = ids::CHECK_POLICY_FIELDS;
const CODE: &str = ids::CODE_FIELD_MISMATCH;

pub fn expectations(spec: &PolicySpec, out: &mut Vec<Expectation>) {
    out.push(Expectation::text(CHECK, CODE, "name", &spec.name));

    if let Some(description) = &spec.description {
        out.push(Expectation::text(CHECK, CODE, "description", description));
    }
    if let Some(policy_type) = spec.policy_type {
        out.push(Expectation::text(CHECK, CODE, "type", policy_type.as_str()));
    }

    let advanced = &spec.advanced_options;
    if let Some(mode) = &advanced.json_parsing {
        out.push(Expectation::text(
            CHECK,
            CODE,
            "advancedOptionsConfig.jsonParsing",
            mode,
        ));
    }
    if let Some(level) = &advanced.log_level {
        out.push(Expectation::text(
            CHECK,
            CODE,
            "advancedOptionsConfig.logLevel",
            level,
        ));
    }

    for (key, value) in &spec.adaptive_protection {
        let field = format!("adaptiveProtectionConfig.{key}");
        out.push(match value {
            OptionValue::Flag(b) => Expectation::flag(CHECK, CODE, &field, *b),
            OptionValue::Text(s) => Expectation::text(CHECK, CODE, &field, s),
        });
    }
}
