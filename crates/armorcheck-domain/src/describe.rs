//! The describe seam: how the verifier reads live state.
//!
//! Implementations live outside the domain (subprocess, fixtures, test doubles).

use crate::model::Target;
use serde_json::Value;

/// Failure to obtain a describe document. Fatal to the run.
#[derive(Debug, thiserror::Error)]
pub enum DescribeError {
    #[error("failed to spawn {program}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with status {status}: {stderr}")]
    CommandFailed {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("invalid JSON describing {resource}")]
    InvalidJson {
        resource: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Read-only access to security policies and their rules.
///
/// A result may be a single JSON object or an array of objects; every element is checked.
pub trait Describe {
    fn describe_policy(&self, target: &Target) -> Result<Value, DescribeError>;

    fn describe_rule(&self, target: &Target, priority: u32) -> Result<Value, DescribeError>;
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe_policy(&self, target: &Target) -> Result<Value, DescribeError> {
        (**self).describe_policy(target)
    }

    fn describe_rule(&self, target: &Target, priority: u32) -> Result<Value, DescribeError> {
        (**self).describe_rule(target, priority)
    }
}
