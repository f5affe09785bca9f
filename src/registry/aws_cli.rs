//! Registry backend that shells out to the AWS CLI.
//!
//! Uses `aws cloudformation describe-stacks` and `aws cloudformation
//! list-exports` with JSON output. The CLI handles credentials, pagination
//! and timeouts.

use serde::Deserialize;
use std::collections::BTreeSet;
use std::process::Command;

use super::provisioning_registry::{ProvisioningRegistry, RegistryError, UnitStatus};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct DescribeStacksOutput {
    #[serde(default)]
    stacks: Vec<StackSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StackSummary {
    #[serde(default)]
    stack_status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListExportsOutput {
    #[serde(default)]
    exports: Vec<ExportSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ExportSummary {
    name: String,
}

/// AWS CLI backed registry for one region.
#[derive(Debug, Clone)]
pub struct AwsCliRegistry {
    program: String,
    region: String,
}

impl AwsCliRegistry {
    /// Use a specific executable instead of `aws` from PATH.
    pub fn with_program(program: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            region: region.into(),
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Run `aws cloudformation <args>` and return stdout on success.
    fn run_cloudformation(&self, subject: &str, args: &[&str]) -> Result<String, RegistryError> {
        tracing::debug!(
            program = %self.program,
            region = %self.region,
            args = %args.join(" "),
            "querying provisioning registry"
        );

        let output = Command::new(&self.program)
            .arg("cloudformation")
            .args(args)
            .args(["--region", self.region.as_str(), "--output", "json"])
            .output()
            .map_err(|e| {
                RegistryError::Transport(format!(
                    "Failed to run {} cloudformation {}: {}. Is the AWS CLI installed and in PATH?",
                    self.program,
                    args.join(" "),
                    e
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_failure(subject, &stderr));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

impl ProvisioningRegistry for AwsCliRegistry {
    fn describe_unit(&self, name: &str) -> Result<UnitStatus, RegistryError> {
        let stdout = self.run_cloudformation(name, &["describe-stacks", "--stack-name", name])?;
        parse_describe_stacks(name, &stdout)
    }

    fn list_exports(&self) -> Result<BTreeSet<String>, RegistryError> {
        let stdout = self.run_cloudformation("exports", &["list-exports"])?;
        parse_list_exports(&stdout)
    }
}

/// Map a failed CLI call to a registry error.
///
/// CloudFormation reports a missing stack as a `ValidationError` whose
/// message says the stack "does not exist".
pub fn classify_failure(subject: &str, stderr: &str) -> RegistryError {
    if stderr.contains("ValidationError") || stderr.contains("does not exist") {
        RegistryError::NotFound(subject.to_string())
    } else {
        RegistryError::Transport(stderr.trim().to_string())
    }
}

/// Status of the first stack in `describe-stacks` output.
///
/// An empty stack list means the unit does not exist.
pub fn parse_describe_stacks(name: &str, json: &str) -> Result<UnitStatus, RegistryError> {
    let output: DescribeStacksOutput = serde_json::from_str(json).map_err(|e| {
        RegistryError::Transport(format!("Unexpected describe-stacks output: {}", e))
    })?;

    let stack = output
        .stacks
        .into_iter()
        .next()
        .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

    let status = stack.stack_status.unwrap_or_default();
    Ok(UnitStatus::from(status.as_str()))
}

pub fn parse_list_exports(json: &str) -> Result<BTreeSet<String>, RegistryError> {
    let output: ListExportsOutput = serde_json::from_str(json)
        .map_err(|e| RegistryError::Transport(format!("Unexpected list-exports output: {}", e)))?;

    Ok(output.exports.into_iter().map(|e| e.name).collect())
}
