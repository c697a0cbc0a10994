use anyhow::Context;
use camino::Utf8Path;
use serde_json::Value;
use std::collections::BTreeMap;

/// Provisioning outputs keyed by name.
///
/// Accepts `terraform output -json` (`{"name": {"value": ...}}`) and plain
/// `{"name": "value"}` maps. Non-string values keep their JSON text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outputs {
    values: BTreeMap<String, String>,
}

impl Outputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Utf8Path) -> anyhow::Result<Self> {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("read outputs file {path}"))?;
        Self::from_json_str(&text).with_context(|| format!("parse outputs file {path}"))
    }

    pub fn from_json_str(text: &str) -> anyhow::Result<Self> {
        let root: Value = serde_json::from_str(text)?;
        let Value::Object(map) = root else {
            anyhow::bail!("outputs must be a JSON object");
        };

        let mut values = BTreeMap::new();
        for (name, raw) in map {
            let value = match raw {
                Value::Object(mut wrapped) if wrapped.contains_key("value") => {
                    wrapped.remove("value").unwrap_or(Value::Null)
                }
                other => other,
            };
            if let Some(text) = scalar_text(value) {
                values.insert(name, text);
            }
        }
        Ok(Self { values })
    }

    /// Apply `name=value` overrides; later entries win.
    pub fn apply_overrides<S: AsRef<str>>(&mut self, pairs: &[S]) -> anyhow::Result<()> {
        for pair in pairs {
            let pair = pair.as_ref();
            let (name, value) = pair
                .split_once('=')
                .with_context(|| format!("invalid output override `{pair}` (expected name=value)"))?;
            let name = name.trim();
            if name.is_empty() {
                anyhow::bail!("invalid output override `{pair}`: empty name");
            }
            self.values.insert(name.to_string(), value.to_string());
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.values
    }
}

fn scalar_text(v: Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terraform_output_shape() {
        let outputs = Outputs::from_json_str(
            r#"{
                "project_id": {"sensitive": false, "type": "string", "value": "proj-123"},
                "policy_name": {"value": "ca-policy-abc"},
                "rule_count": {"value": 14},
                "unset": {"value": null}
            }"#,
        )
        .expect("parse");
        assert_eq!(outputs.get("project_id"), Some("proj-123"));
        assert_eq!(outputs.get("policy_name"), Some("ca-policy-abc"));
        assert_eq!(outputs.get("rule_count"), Some("14"));
        assert_eq!(outputs.get("unset"), None);
    }

    #[test]
    fn plain_map_shape() {
        let outputs =
            Outputs::from_json_str(r#"{"project_id": "p", "region": "us-central1"}"#).expect("parse");
        assert_eq!(outputs.get("region"), Some("us-central1"));
    }

    #[test]
    fn non_object_is_rejected() {
        assert!(Outputs::from_json_str("[1, 2]").is_err());
        assert!(Outputs::from_json_str("not json").is_err());
    }

    #[test]
    fn overrides_replace_and_validate() {
        let mut outputs = Outputs::from_json_str(r#"{"policy_name": "old"}"#).expect("parse");
        outputs
            .apply_overrides(&["policy_name=new", "expr=a=b"])
            .expect("overrides");
        assert_eq!(outputs.get("policy_name"), Some("new"));
        assert_eq!(outputs.get("expr"), Some("a=b"));

        assert!(outputs.apply_overrides(&["missing-separator"]).is_err());
        assert!(outputs.apply_overrides(&["=value"]).is_err());
    }
}
