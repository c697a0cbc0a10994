//! Read access to describe output.
//!
//! Reads never fail: a missing key reads as the empty/zero value, so a malformed
//! document shows up as field mismatches instead of a separate error class.

use armorcheck_types::FieldPath;
use serde_json::Value;

/// One described resource (a policy or a single rule).
#[derive(Clone, Debug, PartialEq)]
pub struct ObservedDoc(Value);

impl ObservedDoc {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Resolve a dotted path. Numeric segments index into arrays.
    pub fn get(&self, path: &FieldPath) -> Option<&Value> {
        let mut cur = &self.0;
        for seg in path.segments() {
            cur = match cur {
                Value::Object(map) => map.get(seg)?,
                Value::Array(items) => items.get(seg.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(cur)
    }

    /// String view: numbers keep their literal text, booleans become
    /// `true`/`false`, null and missing become `""`.
    pub fn text(&self, path: &FieldPath) -> String {
        self.get(path).map(value_text).unwrap_or_default()
    }

    /// Boolean view: parseable boolean strings and non-zero numbers are true.
    pub fn flag(&self, path: &FieldPath) -> bool {
        match self.get(path) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => {
                matches!(s.as_str(), "1" | "t" | "T" | "true" | "TRUE" | "True")
            }
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            _ => false,
        }
    }

    /// Sequence view: arrays yield their elements, missing yields nothing,
    /// a scalar yields itself.
    pub fn sequence(&self, path: &FieldPath) -> Vec<String> {
        match self.get(path) {
            Some(Value::Array(items)) => items.iter().map(value_text).collect(),
            None | Some(Value::Null) => Vec::new(),
            Some(other) => vec![value_text(other)],
        }
    }
}

fn value_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Split a describe result into documents: an array yields one document per
/// element, anything else is a single document.
pub fn documents(value: Value) -> Vec<ObservedDoc> {
    match value {
        Value::Array(items) => items.into_iter().map(ObservedDoc::new).collect(),
        other => vec![ObservedDoc::new(other)],
    }
}
