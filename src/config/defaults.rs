//! Default values and configuration structs with default implementations.

use serde::{Deserialize, Serialize};

/// Macro to generate default functions for serde attributes
macro_rules! default_fn {
    ($name:ident, $type:ty, $value:expr) => {
        pub(crate) fn $name() -> $type {
            $value
        }
    };
}

// =========================================================================
// DEFAULT VALUE FUNCTIONS
// =========================================================================

default_fn!(default_deploy_mode, String, "all".to_string());
default_fn!(default_tenant, String, "demo".to_string());
default_fn!(default_region, String, "us-east-2".to_string());
default_fn!(default_aws_program, String, "aws".to_string());
default_fn!(default_cdk_program, String, "cdk".to_string());

// =========================================================================
// ENVIRONMENT AND CONTEXT KEYS
// =========================================================================

/// Environment variable selecting the deployment mode
pub const DEPLOY_MODE_ENV: &str = "DEPLOY_MODE";
/// Environment variable carrying the tenant identifier
pub const TENANT_ENV: &str = "PARTICIPANT_PREFIX";
/// Environment variable selecting the region
pub const REGION_ENV: &str = "CDK_DEFAULT_REGION";
/// Environment variable overriding the AWS CLI executable
pub const AWS_PROGRAM_ENV: &str = "STACKGATE_AWS_CLI";
/// Environment variable overriding the cdk executable
pub const CDK_PROGRAM_ENV: &str = "STACKGATE_CDK_CLI";

/// Context key selecting the deployment mode (`-c deployMode=ai`)
pub const DEPLOY_MODE_CONTEXT: &str = "deployMode";
/// Context key carrying the tenant identifier (`-c participantPrefix=acme`)
pub const TENANT_CONTEXT: &str = "participantPrefix";

/// Context file read from the working directory
pub const CONTEXT_FILE: &str = "cdk.json";

// =========================================================================
// CONFIG STRUCTS WITH DEFAULTS
// =========================================================================

/// External programs invoked by stackgate (`stackgate` section of cdk.json)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolsConfig {
    /// AWS CLI used to query the provisioning registry (default: aws)
    #[serde(default = "default_aws_program")]
    pub aws_cli: String,
    /// Provisioning tool wrapped by `stackgate run` (default: cdk)
    #[serde(default = "default_cdk_program")]
    pub cdk_cli: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            aws_cli: default_aws_program(),
            cdk_cli: default_cdk_program(),
        }
    }
}
