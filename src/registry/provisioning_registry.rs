use std::collections::BTreeSet;
use std::fmt;

/// Read-only view of the provisioning control plane.
pub trait ProvisioningRegistry {
    /// Current status of the unit named `name`.
    ///
    /// Returns `RegistryError::NotFound` when the unit does not exist.
    fn describe_unit(&self, name: &str) -> Result<UnitStatus, RegistryError>;

    /// Names of every export published in the region.
    fn list_exports(&self) -> Result<BTreeSet<String>, RegistryError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The queried unit does not exist
    NotFound(String),
    /// The query itself failed (auth, network, throttling, bad output)
    Transport(String),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::NotFound(name) => write!(f, "Unit {} does not exist", name),
            RegistryError::Transport(msg) => write!(f, "Registry query failed: {}", msg),
        }
    }
}

impl std::error::Error for RegistryError {}

/// Stack status as reported by the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnitStatus {
    CreateInProgress,
    CreateFailed,
    CreateComplete,
    RollbackInProgress,
    RollbackFailed,
    RollbackComplete,
    DeleteInProgress,
    DeleteFailed,
    DeleteComplete,
    UpdateInProgress,
    UpdateCompleteCleanupInProgress,
    UpdateComplete,
    UpdateFailed,
    UpdateRollbackInProgress,
    UpdateRollbackFailed,
    UpdateRollbackCompleteCleanupInProgress,
    UpdateRollbackComplete,
    ReviewInProgress,
    ImportInProgress,
    ImportComplete,
    ImportRollbackInProgress,
    ImportRollbackFailed,
    ImportRollbackComplete,
    Other(String),
}

impl UnitStatus {
    /// Only these states count as a usable unit. Rolled back, failed and
    /// in-progress units are treated as absent.
    pub fn is_terminal_success(&self) -> bool {
        matches!(self, UnitStatus::CreateComplete | UnitStatus::UpdateComplete)
    }

    pub fn as_str(&self) -> &str {
        match self {
            UnitStatus::CreateInProgress => "CREATE_IN_PROGRESS",
            UnitStatus::CreateFailed => "CREATE_FAILED",
            UnitStatus::CreateComplete => "CREATE_COMPLETE",
            UnitStatus::RollbackInProgress => "ROLLBACK_IN_PROGRESS",
            UnitStatus::RollbackFailed => "ROLLBACK_FAILED",
            UnitStatus::RollbackComplete => "ROLLBACK_COMPLETE",
            UnitStatus::DeleteInProgress => "DELETE_IN_PROGRESS",
            UnitStatus::DeleteFailed => "DELETE_FAILED",
            UnitStatus::DeleteComplete => "DELETE_COMPLETE",
            UnitStatus::UpdateInProgress => "UPDATE_IN_PROGRESS",
            UnitStatus::UpdateCompleteCleanupInProgress => "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS",
            UnitStatus::UpdateComplete => "UPDATE_COMPLETE",
            UnitStatus::UpdateFailed => "UPDATE_FAILED",
            UnitStatus::UpdateRollbackInProgress => "UPDATE_ROLLBACK_IN_PROGRESS",
            UnitStatus::UpdateRollbackFailed => "UPDATE_ROLLBACK_FAILED",
            UnitStatus::UpdateRollbackCompleteCleanupInProgress => {
                "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS"
            }
            UnitStatus::UpdateRollbackComplete => "UPDATE_ROLLBACK_COMPLETE",
            UnitStatus::ReviewInProgress => "REVIEW_IN_PROGRESS",
            UnitStatus::ImportInProgress => "IMPORT_IN_PROGRESS",
            UnitStatus::ImportComplete => "IMPORT_COMPLETE",
            UnitStatus::ImportRollbackInProgress => "IMPORT_ROLLBACK_IN_PROGRESS",
            UnitStatus::ImportRollbackFailed => "IMPORT_ROLLBACK_FAILED",
            UnitStatus::ImportRollbackComplete => "IMPORT_ROLLBACK_COMPLETE",
            UnitStatus::Other(s) => s,
        }
    }
}

impl From<&str> for UnitStatus {
    fn from(s: &str) -> Self {
        match s {
            "CREATE_IN_PROGRESS" => UnitStatus::CreateInProgress,
            "CREATE_FAILED" => UnitStatus::CreateFailed,
            "CREATE_COMPLETE" => UnitStatus::CreateComplete,
            "ROLLBACK_IN_PROGRESS" => UnitStatus::RollbackInProgress,
            "ROLLBACK_FAILED" => UnitStatus::RollbackFailed,
            "ROLLBACK_COMPLETE" => UnitStatus::RollbackComplete,
            "DELETE_IN_PROGRESS" => UnitStatus::DeleteInProgress,
            "DELETE_FAILED" => UnitStatus::DeleteFailed,
            "DELETE_COMPLETE" => UnitStatus::DeleteComplete,
            "UPDATE_IN_PROGRESS" => UnitStatus::UpdateInProgress,
            "UPDATE_COMPLETE_CLEANUP_IN_PROGRESS" => UnitStatus::UpdateCompleteCleanupInProgress,
            "UPDATE_COMPLETE" => UnitStatus::UpdateComplete,
            "UPDATE_FAILED" => UnitStatus::UpdateFailed,
            "UPDATE_ROLLBACK_IN_PROGRESS" => UnitStatus::UpdateRollbackInProgress,
            "UPDATE_ROLLBACK_FAILED" => UnitStatus::UpdateRollbackFailed,
            "UPDATE_ROLLBACK_COMPLETE_CLEANUP_IN_PROGRESS" => {
                UnitStatus::UpdateRollbackCompleteCleanupInProgress
            }
            "UPDATE_ROLLBACK_COMPLETE" => UnitStatus::UpdateRollbackComplete,
            "REVIEW_IN_PROGRESS" => UnitStatus::ReviewInProgress,
            "IMPORT_IN_PROGRESS" => UnitStatus::ImportInProgress,
            "IMPORT_COMPLETE" => UnitStatus::ImportComplete,
            "IMPORT_ROLLBACK_IN_PROGRESS" => UnitStatus::ImportRollbackInProgress,
            "IMPORT_ROLLBACK_FAILED" => UnitStatus::ImportRollbackFailed,
            "IMPORT_ROLLBACK_COMPLETE" => UnitStatus::ImportRollbackComplete,
            other => UnitStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for UnitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
