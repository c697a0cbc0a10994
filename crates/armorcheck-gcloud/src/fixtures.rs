use armorcheck_domain::model::Target;
use armorcheck_domain::{Describe, DescribeError};
use camino::Utf8PathBuf;
use serde_json::Value;
use tracing::debug;

/// Recorded describe output on disk:
///
/// ```text
/// <root>/policy.json
/// <root>/rules/<priority>.json
/// ```
///
/// The target coordinates are not part of the layout; one directory holds one policy.
#[derive(Clone, Debug)]
pub struct FixtureDescriber {
    root: Utf8PathBuf,
}

impl FixtureDescriber {
    pub fn new(root: impl Into<Utf8PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn load(&self, path: Utf8PathBuf, resource: String) -> Result<Value, DescribeError> {
        debug!(%path, "reading recorded describe output for {resource}");

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DescribeError::NotFound { resource });
            }
            Err(source) => {
                return Err(DescribeError::Io {
                    path: path.to_string(),
                    source,
                });
            }
        };

        serde_json::from_str(&text).map_err(|source| DescribeError::InvalidJson { resource, source })
    }
}

impl Describe for FixtureDescriber {
    fn describe_policy(&self, target: &Target) -> Result<Value, DescribeError> {
        self.load(self.root.join("policy.json"), target.resource())
    }

    fn describe_rule(&self, target: &Target, priority: u32) -> Result<Value, DescribeError> {
        self.load(
            self.root.join("rules").join(format!("{priority}.json")),
            target.rule_resource(priority),
        )
    }
}
