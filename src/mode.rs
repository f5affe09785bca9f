//! Deployment modes and provisioning actions.
//!
//! The deployment mode selects which units a run deploys and which
//! prerequisites must already exist. The action is the `cdk` verb the run
//! wraps; only actions that talk to live infrastructure need validation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which slice of the workshop infrastructure a run provisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeployMode {
    /// Shared network unit only (instructor, before the workshop)
    Network,
    /// Per-tenant base units (instructor, before the workshop)
    Legacy,
    /// One tenant's AI extension units (participants, during the workshop)
    Ai,
    /// Everything, in dependency order
    #[default]
    All,
}

impl DeployMode {
    /// Every accepted mode, in the order they are documented.
    pub const ALL_VALUES: [DeployMode; 4] = [
        DeployMode::Network,
        DeployMode::Legacy,
        DeployMode::Ai,
        DeployMode::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DeployMode::Network => "network",
            DeployMode::Legacy => "legacy",
            DeployMode::Ai => "ai",
            DeployMode::All => "all",
        }
    }

    /// Accepted values formatted for error messages: `"network", "legacy", "ai", "all"`.
    pub fn valid_values() -> String {
        Self::ALL_VALUES
            .iter()
            .map(|m| format!("\"{}\"", m.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for DeployMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mode string outside the recognized set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeParseError {
    pub value: String,
}

impl fmt::Display for ModeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid deploy mode \"{}\" (valid values: {})",
            self.value,
            DeployMode::valid_values()
        )
    }
}

impl std::error::Error for ModeParseError {}

impl FromStr for DeployMode {
    type Err = ModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "network" => Ok(DeployMode::Network),
            "legacy" => Ok(DeployMode::Legacy),
            "ai" => Ok(DeployMode::Ai),
            "all" => Ok(DeployMode::All),
            other => Err(ModeParseError {
                value: other.to_string(),
            }),
        }
    }
}

/// The `cdk` verb a run wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CdkAction {
    Deploy,
    Diff,
    Synth,
    Destroy,
    List,
    Other(String),
}

impl CdkAction {
    pub fn parse(word: &str) -> Self {
        match word.trim() {
            "deploy" => CdkAction::Deploy,
            "diff" => CdkAction::Diff,
            "synth" | "synthesize" => CdkAction::Synth,
            "destroy" => CdkAction::Destroy,
            "ls" | "list" => CdkAction::List,
            other => CdkAction::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            CdkAction::Deploy => "deploy",
            CdkAction::Diff => "diff",
            CdkAction::Synth => "synth",
            CdkAction::Destroy => "destroy",
            CdkAction::List => "ls",
            CdkAction::Other(word) => word,
        }
    }

    /// Whether this action needs live prerequisite checks.
    ///
    /// Synthesis and listing run in preview/CI contexts without registry
    /// access, so only `deploy` and `diff` are guarded.
    pub fn requires_validation(&self) -> bool {
        matches!(self, CdkAction::Deploy | CdkAction::Diff)
    }
}

impl fmt::Display for CdkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
