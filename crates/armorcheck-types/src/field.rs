use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dotted path into a describe document, e.g. `rateLimitOptions.banThreshold.count`.
///
/// Normalization is deliberately small:
/// - surrounding whitespace is dropped
/// - empty segments (`a..b`, leading/trailing dots) are removed
///
/// Segment text is otherwise kept verbatim; lookups are case-sensitive.
#[derive(
    Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let joined = s
            .as_ref()
            .trim()
            .split('.')
            .filter(|seg| !seg.is_empty())
            .collect::<Vec<_>>()
            .join(".");
        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|seg| !seg.is_empty())
    }

    pub fn join(&self, segment: &str) -> FieldPath {
        if self.is_root() {
            FieldPath::new(segment)
        } else {
            FieldPath::new(format!("{}.{}", self.0, segment))
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        FieldPath::new(value)
    }
}
