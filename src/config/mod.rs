//! Deployment configuration.
//!
//! Inputs are resolved once at startup into a typed [`DeployConfig`] and
//! validated eagerly, so a bad mode or tenant fails before any registry
//! query. Resolution order (first match wins):
//! 1. Command-line flags (`--mode`, `--tenant`, `--region`)
//! 2. Command-line context (`-c deployMode=ai`)
//! 3. Context file (`cdk.json` `context` section)
//! 4. Environment (`DEPLOY_MODE`, `PARTICIPANT_PREFIX`, `CDK_DEFAULT_REGION`)
//! 5. Defaults (`all`, `demo`, `us-east-2`)
//!
//! Empty values count as unset at every layer.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::mode::DeployMode;
use crate::tenant::TenantList;
use crate::validator::ValidationError;

pub mod defaults;

pub use defaults::*;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Flag,
    Context,
    ContextFile,
    Env,
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::Flag => write!(f, "flag"),
            ValueSource::Context => write!(f, "context"),
            ValueSource::ContextFile => write!(f, "{}", CONTEXT_FILE),
            ValueSource::Env => write!(f, "environment"),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub mode: Option<String>,
    pub tenant: Option<String>,
    pub region: Option<String>,
    /// `-c key=value` pairs
    pub context: Vec<(String, String)>,
}

impl CliOverrides {
    fn context_value(&self, key: &str) -> Option<String> {
        // Later -c flags win, like cdk
        self.context
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
            .filter(|v| !v.is_empty())
    }
}

/// Parse a `key=value` context argument.
pub fn parse_context_arg(arg: &str) -> Result<(String, String)> {
    let (key, value) = arg
        .split_once('=')
        .with_context(|| format!("Invalid context '{}': expected key=value", arg))?;

    let key = key.trim();
    if key.is_empty() {
        anyhow::bail!("Invalid context '{}': key is empty", arg);
    }

    Ok((key.to_string(), value.trim().to_string()))
}

/// The parts of `cdk.json` stackgate reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContextFile {
    #[serde(default)]
    pub context: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub stackgate: Option<ToolsConfig>,
}

impl ContextFile {
    /// Load the context file, or an empty one when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read context from {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// A context value as a string. Strings are taken as-is, other scalars
    /// are rendered as JSON; empty strings and null count as unset.
    pub fn value(&self, key: &str) -> Option<String> {
        match self.context.get(key)? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Fully resolved, validated configuration for one run.
#[derive(Debug, Clone)]
pub struct DeployConfig {
    pub mode: DeployMode,
    pub mode_source: ValueSource,
    pub tenants: TenantList,
    pub tenant_source: ValueSource,
    pub region: String,
    pub region_source: ValueSource,
    pub tools: ToolsConfig,
}

impl DeployConfig {
    /// Resolve from the command line, `cdk.json` in the working directory and
    /// the process environment.
    pub fn load(overrides: &CliOverrides) -> Result<Self> {
        let context_file = ContextFile::load_from(Path::new(CONTEXT_FILE))?;
        Self::resolve(overrides, &context_file, |key| std::env::var(key).ok())
    }

    /// Resolve from explicit sources.
    pub fn resolve<F>(overrides: &CliOverrides, context_file: &ContextFile, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let (raw_mode, mode_source) = first_of([
            (overrides.mode.clone(), ValueSource::Flag),
            (overrides.context_value(DEPLOY_MODE_CONTEXT), ValueSource::Context),
            (context_file.value(DEPLOY_MODE_CONTEXT), ValueSource::ContextFile),
            (env(DEPLOY_MODE_ENV), ValueSource::Env),
        ])
        .unwrap_or_else(|| (defaults::default_deploy_mode(), ValueSource::Default));

        let (raw_tenant, tenant_source) = first_of([
            (overrides.tenant.clone(), ValueSource::Flag),
            (overrides.context_value(TENANT_CONTEXT), ValueSource::Context),
            (context_file.value(TENANT_CONTEXT), ValueSource::ContextFile),
            (env(TENANT_ENV), ValueSource::Env),
        ])
        .unwrap_or_else(|| (defaults::default_tenant(), ValueSource::Default));

        let (region, region_source) = first_of([
            (overrides.region.clone(), ValueSource::Flag),
            (env(REGION_ENV), ValueSource::Env),
        ])
        .unwrap_or_else(|| (defaults::default_region(), ValueSource::Default));

        let mode: DeployMode = raw_mode
            .trim()
            .parse()
            .map_err(|_| ValidationError::invalid_mode(raw_mode.trim()))?;

        let tenants = TenantList::parse(&raw_tenant).map_err(ValidationError::invalid_tenant)?;
        if mode == DeployMode::Ai {
            tenants.single().map_err(ValidationError::invalid_tenant)?;
        }

        let mut tools = context_file.stackgate.clone().unwrap_or_default();
        if let Some(program) = env(AWS_PROGRAM_ENV) {
            tools.aws_cli = program;
        }
        if let Some(program) = env(CDK_PROGRAM_ENV) {
            tools.cdk_cli = program;
        }

        Ok(Self {
            mode,
            mode_source,
            tenants,
            tenant_source,
            region,
            region_source,
            tools,
        })
    }
}

/// First non-empty candidate, with its source.
fn first_of<const N: usize>(
    candidates: [(Option<String>, ValueSource); N],
) -> Option<(String, ValueSource)> {
    candidates.into_iter().find_map(|(value, source)| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(|v| (v, source))
    })
}
