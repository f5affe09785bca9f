//! Actionable error messages for dependency validation.
//!
//! Each message names what is missing and gives the exact command to fix it
//! in both PowerShell and Bash.

use crate::mode::DeployMode;
use crate::tenant::TenantId;

/// Environment variable selecting the deployment mode.
pub const DEPLOY_MODE_VAR: &str = "DEPLOY_MODE";

/// Environment variable carrying the tenant identifier.
pub const TENANT_VAR: &str = "PARTICIPANT_PREFIX";

/// Shell commands that deploy `unit` in `mode`, optionally for one tenant.
pub fn deploy_commands(mode: DeployMode, tenant: Option<&TenantId>, unit: &str) -> String {
    match tenant {
        Some(tenant) => format!(
            "\x20 PowerShell: $env:{mv} = \"{mode}\"; $env:{tv} = \"{tenant}\"; cdk deploy {unit}\n\
             \x20 Bash: export {mv}={mode} {tv}={tenant} && cdk deploy {unit}\n",
            mv = DEPLOY_MODE_VAR,
            tv = TENANT_VAR,
            mode = mode,
            tenant = tenant,
            unit = unit,
        ),
        None => format!(
            "\x20 PowerShell: $env:{mv} = \"{mode}\"; cdk deploy {unit}\n\
             \x20 Bash: export {mv}={mode} && cdk deploy {unit}\n",
            mv = DEPLOY_MODE_VAR,
            mode = mode,
            unit = unit,
        ),
    }
}

/// The shared network unit is missing; base units cannot be deployed.
pub fn network_unit_missing(unit: &str) -> String {
    format!(
        "Error: {unit} not found\n\n\
         Context:\n\
         \x20 - {unit} must be deployed before any base (legacy) unit\n\
         \x20 - Units in a failed, rolled back or in-progress state count as missing\n\n\
         Next Steps:\n\
         {commands}",
        unit = unit,
        commands = deploy_commands(DeployMode::Network, None, unit),
    )
}

/// A tenant's base unit is missing; its AI units cannot be deployed.
pub fn tenant_unit_missing(unit: &str, tenant: &TenantId) -> String {
    format!(
        "Error: {unit} not found\n\n\
         Context:\n\
         \x20 - The base (legacy) unit for tenant \"{tenant}\" must be deployed first\n\
         \x20 - The instructor deploys this unit before the workshop\n\
         \x20 - Units in a failed, rolled back or in-progress state count as missing\n\n\
         Next Steps (instructor):\n\
         {commands}",
        unit = unit,
        tenant = tenant,
        commands = deploy_commands(DeployMode::Legacy, Some(tenant), unit),
    )
}

/// The unit exists but does not publish an export its dependents need.
pub fn unit_incomplete(unit: &str, export: &str, redeploy: &str) -> String {
    format!(
        "Error: Export \"{export}\" not found\n\n\
         Context:\n\
         \x20 - {unit} exists but does not publish the exports its dependents need\n\
         \x20 - It may be in an incomplete state or was deployed with an older version\n\n\
         Next Steps:\n\
         \x20 1. Inspect the unit:  aws cloudformation describe-stacks --stack-name {unit}\n\
         \x20 2. List published exports:  aws cloudformation list-exports\n\
         \x20 3. Redeploy the unit:\n\
         {redeploy}",
        export = export,
        unit = unit,
        redeploy = redeploy,
    )
}

pub fn invalid_mode(value: &str) -> String {
    format!(
        "Error: Invalid {mv}: \"{value}\"\n\n\
         Valid values: {valid}\n",
        mv = DEPLOY_MODE_VAR,
        value = value,
        valid = DeployMode::valid_values(),
    )
}

pub fn invalid_tenant(reason: &str) -> String {
    format!(
        "Error: Invalid {tv}: {reason}\n\n\
         Next Steps:\n\
         \x20 1. Use letters, digits and '-' only, starting with a letter\n\
         \x20 2. Separate several tenants with ',' (network, legacy and all modes only)\n",
        tv = TENANT_VAR,
        reason = reason,
    )
}

/// The registry could not be queried, so no conclusion can be drawn.
pub fn registry_unreachable(unit: &str, detail: &str) -> String {
    format!(
        "Error: Could not check {unit} in the provisioning registry\n\n\
         Context:\n\
         \x20 - {detail}\n\
         \x20 - The unit may or may not exist; nothing was deployed\n\n\
         Next Steps:\n\
         \x20 1. Check credentials:  aws sts get-caller-identity\n\
         \x20 2. Check the region (CDK_DEFAULT_REGION) points at the workshop account\n\
         \x20 3. Retry once the registry is reachable\n",
        unit = unit,
        detail = detail,
    )
}
