use armorcheck_domain::model::Target;
use armorcheck_domain::{Describe, DescribeError};
use serde_json::Value;
use std::process::Command;
use tracing::{debug, warn};

/// Environment variable overriding the `gcloud` binary.
pub const GCLOUD_ENV: &str = "ARMORCHECK_GCLOUD";

/// Runs `gcloud compute security-policies ... describe --format=json`.
#[derive(Clone, Debug)]
pub struct GcloudDescriber {
    program: String,
}

impl GcloudDescriber {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// `$ARMORCHECK_GCLOUD`, falling back to `gcloud` on `PATH`.
    pub fn from_env() -> Self {
        Self::new(std::env::var(GCLOUD_ENV).unwrap_or_else(|_| "gcloud".to_string()))
    }

    pub fn policy_args(target: &Target) -> Vec<String> {
        let mut args = vec![
            "compute".to_string(),
            "security-policies".to_string(),
            "describe".to_string(),
            target.policy.clone(),
        ];
        push_scope(&mut args, target);
        args
    }

    pub fn rule_args(target: &Target, priority: u32) -> Vec<String> {
        let mut args = vec![
            "compute".to_string(),
            "security-policies".to_string(),
            "rules".to_string(),
            "describe".to_string(),
            priority.to_string(),
            format!("--security-policy={}", target.policy),
        ];
        push_scope(&mut args, target);
        args
    }

    fn run(&self, args: &[String], resource: String) -> Result<Value, DescribeError> {
        debug!(program = %self.program, ?args, "describing {resource}");

        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| DescribeError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(status = %output.status, %stderr, "describe failed for {resource}");
            if is_not_found(&stderr) {
                return Err(DescribeError::NotFound { resource });
            }
            return Err(DescribeError::CommandFailed {
                command: format!("{} {}", self.program, args.join(" ")),
                status: output.status.to_string(),
                stderr,
            });
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|source| DescribeError::InvalidJson { resource, source })
    }
}

impl Default for GcloudDescriber {
    fn default() -> Self {
        Self::from_env()
    }
}

impl Describe for GcloudDescriber {
    fn describe_policy(&self, target: &Target) -> Result<Value, DescribeError> {
        self.run(&Self::policy_args(target), target.resource())
    }

    fn describe_rule(&self, target: &Target, priority: u32) -> Result<Value, DescribeError> {
        self.run(
            &Self::rule_args(target, priority),
            target.rule_resource(priority),
        )
    }
}

fn push_scope(args: &mut Vec<String>, target: &Target) {
    args.push("--project".to_string());
    args.push(target.project.clone());
    if let Some(region) = &target.region {
        args.push("--region".to_string());
        args.push(region.clone());
    }
    args.push("--format=json".to_string());
}

fn is_not_found(stderr: &str) -> bool {
    stderr.contains("was not found") || stderr.contains("HTTPError 404")
}
