//! `stackgate run`: wrap a cdk command behind the dependency gate.

use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;

use stackgate::config::{
    DeployConfig, DEPLOY_MODE_CONTEXT, DEPLOY_MODE_ENV, REGION_ENV, TENANT_CONTEXT, TENANT_ENV,
};
use stackgate::mode::CdkAction;
use stackgate::plan::DeploymentPlan;
use stackgate::ui;
use stackgate::validator::StackValidator;

/// A fully assembled cdk invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CdkInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl CdkInvocation {
    /// Assemble `cdk <action> [units...] -c deployMode=.. -c participantPrefix=.. [extra...]`.
    ///
    /// Mode and tenant are passed as context as well as environment so the
    /// app sees the values stackgate validated even when `cdk.json` sets
    /// its own.
    pub fn build(
        config: &DeployConfig,
        action: &CdkAction,
        units: &[String],
        extra: &[String],
    ) -> Result<Self> {
        let mut words = config.tools.cdk_cli.split_whitespace().map(String::from);
        let program = words
            .next()
            .context("cdk program is empty; set STACKGATE_CDK_CLI or stackgate.cdkCli")?;

        let mut args: Vec<String> = words.collect();
        args.push(action.as_str().to_string());

        if takes_unit_names(action) {
            args.extend(units.iter().cloned());
        }

        let tenants = config.tenants.to_string();
        args.push("-c".to_string());
        args.push(format!("{}={}", DEPLOY_MODE_CONTEXT, config.mode));
        args.push("-c".to_string());
        args.push(format!("{}={}", TENANT_CONTEXT, tenants));
        args.extend(extra.iter().cloned());

        let env = vec![
            (DEPLOY_MODE_ENV.to_string(), config.mode.to_string()),
            (TENANT_ENV.to_string(), tenants),
            (REGION_ENV.to_string(), config.region.clone()),
        ];

        Ok(Self { program, args, env })
    }

    /// Shell-style rendering for `--dry-run` and logs.
    pub fn display(&self) -> String {
        let mut parts: Vec<String> = self.env.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        parts.join(" ")
    }

    /// Run to completion with inherited stdio, returning the exit code.
    pub fn execute(&self) -> Result<i32> {
        tracing::info!(command = %self.display(), "running cdk");

        let status = Command::new(&self.program)
            .args(&self.args)
            .envs(self.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .status()
            .with_context(|| {
                format!(
                    "Failed to run {}. Is the AWS CDK CLI installed and in PATH?",
                    self.program
                )
            })?;

        // Killed by a signal: no code, report failure
        Ok(status.code().unwrap_or(1))
    }
}

fn takes_unit_names(action: &CdkAction) -> bool {
    matches!(
        action,
        CdkAction::Deploy | CdkAction::Diff | CdkAction::Synth | CdkAction::Destroy
    )
}

pub fn cmd_run(
    config: &DeployConfig,
    action: &CdkAction,
    dry_run: bool,
    extra: &[String],
) -> Result<i32> {
    if action.requires_validation() {
        let validator = StackValidator::new(super::registry(config));
        validator.validate(config.mode, &config.tenants)?;
    } else {
        tracing::debug!(action = %action, "validation skipped for action");
    }

    let plan = DeploymentPlan::for_mode(config.mode, &config.tenants)?;
    let units: Vec<String> = plan.ordered()?.into_iter().map(|u| u.name.clone()).collect();
    let invocation = CdkInvocation::build(config, action, &units, extra)?;

    if dry_run {
        println!("{}", invocation.display());
        return Ok(0);
    }

    if !ui::is_quiet() {
        println!("{} {}", "→".cyan(), invocation.display().dimmed());
    }

    invocation.execute()
}
