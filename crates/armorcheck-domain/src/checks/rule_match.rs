use super::{Expectation, Expected};
use crate::model::{MatchSpec, RuleSpec};
use armorcheck_types::{FieldPath, ids};

const CHECK: &str = ids::CHECK_RULE_MATCH;

pub fn expectations(spec: &RuleSpec, out: &mut Vec<Expectation>) {
    let Some(matcher) = &spec.matcher else {
        return;
    };

    match matcher {
        MatchSpec::VersionedExpr {
            versioned_expr,
            src_ip_ranges,
        } => {
            if let Some(version) = versioned_expr {
                out.push(Expectation::text(
                    CHECK,
                    ids::CODE_FIELD_MISMATCH,
                    "match.versionedExpr",
                    version,
                ));
            }
            out.push(Expectation {
                check_id: CHECK,
                code: ids::CODE_IP_RANGE_MISMATCH,
                field: FieldPath::new("match.config.srcIpRanges"),
                expected: Expected::Sequence(src_ip_ranges.clone()),
            });
        }
        // Verbatim: a trailing newline is part of the expected value.
        MatchSpec::Expr { expression } => out.push(Expectation::text(
            CHECK,
            ids::CODE_EXPRESSION_MISMATCH,
            "match.expr.expression",
            expression,
        )),
    }
}
