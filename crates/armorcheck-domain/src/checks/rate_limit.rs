use super::Expectation;
use crate::model::{RuleSpec, ThresholdSpec};
use armorcheck_types::ids;

const CHECK: &str = ids::CHECK_RULE_RATE_LIMIT;
const CODE: &str = ids::CODE_FIELD_MISMATCH;

pub fn expectations(spec: &RuleSpec, out: &mut Vec<Expectation>) {
    let Some(rl) = &spec.rate_limit else {
        return;
    };

    let mut push = |field: &str, value: &Option<String>| {
        if let Some(v) = value {
            out.push(Expectation::text(
                CHECK,
                CODE,
                &format!("rateLimitOptions.{field}"),
                v,
            ));
        }
    };

    push("conformAction", &rl.conform_action);
    push("exceedAction", &rl.exceed_action);
    push("enforceOnKey", &rl.enforce_on_key);
    if let Some(t) = &rl.rate_limit_threshold {
        threshold(&mut push, "rateLimitThreshold", t);
    }
    push("banDurationSec", &rl.ban_duration_sec);
    if let Some(t) = &rl.ban_threshold {
        threshold(&mut push, "banThreshold", t);
    }
}

fn threshold(push: &mut impl FnMut(&str, &Option<String>), name: &str, t: &ThresholdSpec) {
    push(&format!("{name}.count"), &t.count);
    push(&format!("{name}.intervalSec"), &t.interval_sec);
}
