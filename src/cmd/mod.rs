//! Command module structure for stackgate CLI

use anyhow::Result;
use clap::Args;

use stackgate::config::{self, CliOverrides, DeployConfig};
use stackgate::registry::AwsCliRegistry;

pub mod plan;
pub mod run;
pub mod status;
pub mod util;
pub mod validate;

/// Mode, tenant and region selection shared by every deployment command.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Deployment mode: network, legacy, ai or all
    #[arg(long, short)]
    pub mode: Option<String>,
    /// Tenant identifier; comma-separated for network, legacy and all
    #[arg(long, short)]
    pub tenant: Option<String>,
    /// Region of the provisioning registry
    #[arg(long)]
    pub region: Option<String>,
    /// Context value, as passed to cdk (e.g. -c deployMode=ai)
    #[arg(short = 'c', long = "context", value_name = "KEY=VALUE", value_parser = context_arg)]
    pub context: Vec<(String, String)>,
}

impl TargetArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            mode: self.mode.clone(),
            tenant: self.tenant.clone(),
            region: self.region.clone(),
            context: self.context.clone(),
        }
    }

    /// Resolve the full configuration for this invocation.
    pub fn load(&self) -> Result<DeployConfig> {
        let config = DeployConfig::load(&self.overrides())?;
        tracing::debug!(
            mode = %config.mode,
            mode_source = %config.mode_source,
            tenants = %config.tenants,
            tenant_source = %config.tenant_source,
            region = %config.region,
            region_source = %config.region_source,
            "configuration resolved"
        );
        Ok(config)
    }
}

fn context_arg(arg: &str) -> Result<(String, String), String> {
    config::parse_context_arg(arg).map_err(|e| e.to_string())
}

/// Registry client for the configured region and AWS CLI.
pub fn registry(config: &DeployConfig) -> AwsCliRegistry {
    AwsCliRegistry::with_program(config.tools.aws_cli.as_str(), config.region.as_str())
}
