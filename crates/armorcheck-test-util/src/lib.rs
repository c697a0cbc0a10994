//! Shared test utilities for the armorcheck workspace.
//!
//! Golden reports under `tests/fixtures/` are compared after normalization,
//! so CLI tests in several crates share this instead of a `#[cfg(test)]` module.

use serde_json::Value;

pub const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
pub const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// - `tool.version` is replaced only on a root report envelope (an object with
///   `schema`, `tool`, `verdict` and `findings`), never inside finding data.
/// - `started_at` / `finished_at` are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "verdict", "findings"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool_obj) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String(VERSION_PLACEHOLDER.to_string()),
            );
        }
    }
    normalize_timestamps(&mut value);
    value
}

fn normalize_timestamps(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if let Some(v) = map.get_mut(key) {
                    *v = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                }
            }
            map.values_mut().for_each(normalize_timestamps);
        }
        Value::Array(arr) => arr.iter_mut().for_each(normalize_timestamps),
        _ => {}
    }
}
