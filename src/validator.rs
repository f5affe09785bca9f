//! Deployment dependency validation.
//!
//! Before a run provisions anything, the validator checks that the units it
//! builds on already exist in a usable state and publish the exports it
//! imports. A failure carries an operator-facing message with the exact
//! command that fixes it, instead of an opaque provisioning error halfway
//! through a rollout.
//!
//! The validator is read-only and keeps no state between calls: every check
//! re-queries the registry, one query at a time, stopping at the first
//! failure.

use std::fmt;

use crate::mode::DeployMode;
use crate::registry::{ProvisioningRegistry, RegistryError};
use crate::remediation;
use crate::tenant::{TenantError, TenantId, TenantList};
use crate::units;

/// Broad category of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Required unit does not exist or is not in a usable state
    UnitMissing,
    /// Unit exists but lacks a required export
    UnitIncomplete,
    /// Deployment mode outside the recognized set
    InvalidMode,
    /// Tenant identifier unusable for the requested mode
    InvalidTenant,
    /// Registry query failed for reasons other than "not found"
    TransportFailure,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::UnitMissing => write!(f, "unit missing"),
            FailureKind::UnitIncomplete => write!(f, "unit incomplete"),
            FailureKind::InvalidMode => write!(f, "invalid mode"),
            FailureKind::InvalidTenant => write!(f, "invalid tenant"),
            FailureKind::TransportFailure => write!(f, "transport failure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnitMissing {
        unit: String,
        message: String,
    },
    UnitIncomplete {
        unit: String,
        missing_export: String,
        message: String,
    },
    InvalidMode {
        value: String,
        message: String,
    },
    InvalidTenant {
        reason: TenantError,
        message: String,
    },
    Transport {
        unit: String,
        source: RegistryError,
        message: String,
    },
}

impl ValidationError {
    pub fn invalid_mode(value: &str) -> Self {
        ValidationError::InvalidMode {
            value: value.to_string(),
            message: remediation::invalid_mode(value),
        }
    }

    pub fn invalid_tenant(reason: TenantError) -> Self {
        let message = remediation::invalid_tenant(&reason.to_string());
        ValidationError::InvalidTenant { reason, message }
    }

    pub fn kind(&self) -> FailureKind {
        match self {
            ValidationError::UnitMissing { .. } => FailureKind::UnitMissing,
            ValidationError::UnitIncomplete { .. } => FailureKind::UnitIncomplete,
            ValidationError::InvalidMode { .. } => FailureKind::InvalidMode,
            ValidationError::InvalidTenant { .. } => FailureKind::InvalidTenant,
            ValidationError::Transport { .. } => FailureKind::TransportFailure,
        }
    }

    /// The unit or export that is missing, if the failure is about one.
    pub fn missing_identity(&self) -> Option<&str> {
        match self {
            ValidationError::UnitMissing { unit, .. } => Some(unit.as_str()),
            ValidationError::UnitIncomplete { missing_export, .. } => Some(missing_export.as_str()),
            ValidationError::Transport { unit, .. } => Some(unit.as_str()),
            ValidationError::InvalidMode { .. } | ValidationError::InvalidTenant { .. } => None,
        }
    }

    /// Full operator-facing message, including remediation steps.
    pub fn message(&self) -> &str {
        match self {
            ValidationError::UnitMissing { message, .. }
            | ValidationError::UnitIncomplete { message, .. }
            | ValidationError::InvalidMode { message, .. }
            | ValidationError::InvalidTenant { message, .. }
            | ValidationError::Transport { message, .. } => message.as_str(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for ValidationError {}

/// A unit that must already be deployed, with the exports its dependents import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prerequisite {
    pub unit: String,
    pub exports: Vec<String>,
    /// Tenant owning the unit; `None` for shared units.
    pub tenant: Option<TenantId>,
}

impl Prerequisite {
    /// Shared network unit, required by base units.
    pub fn network() -> Self {
        Self {
            unit: units::network_unit(),
            exports: units::network_exports(),
            tenant: None,
        }
    }

    /// A tenant's base unit, required by that tenant's AI units.
    pub fn tenant_base(tenant: &TenantId) -> Self {
        Self {
            unit: units::legacy_unit(tenant),
            exports: units::legacy_exports(tenant),
            tenant: Some(tenant.clone()),
        }
    }

    /// What a `mode` run needs deployed beforehand.
    ///
    /// `network` has no prerequisites and `all` deploys everything in order
    /// within one pass, so neither needs one. Only `ai` reads the tenant.
    pub fn required_by(mode: DeployMode, tenant: &str) -> Result<Option<Self>, TenantError> {
        match mode {
            DeployMode::Network | DeployMode::All => Ok(None),
            DeployMode::Legacy => Ok(Some(Self::network())),
            DeployMode::Ai => {
                let tenants = TenantList::parse(tenant)?;
                Ok(Some(Self::tenant_base(tenants.single()?)))
            }
        }
    }

    /// Mode that deploys this unit.
    fn deploy_mode(&self) -> DeployMode {
        match self.tenant {
            Some(_) => DeployMode::Legacy,
            None => DeployMode::Network,
        }
    }

    fn missing_message(&self) -> String {
        match &self.tenant {
            Some(tenant) => remediation::tenant_unit_missing(&self.unit, tenant),
            None => remediation::network_unit_missing(&self.unit),
        }
    }

    fn incomplete_message(&self, export: &str) -> String {
        let redeploy =
            remediation::deploy_commands(self.deploy_mode(), self.tenant.as_ref(), &self.unit);
        remediation::unit_incomplete(&self.unit, export, &redeploy)
    }
}

/// Checks deployment prerequisites against a provisioning registry.
pub struct StackValidator<R> {
    registry: R,
}

impl<R: ProvisioningRegistry> StackValidator<R> {
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Whether `name` exists in `CREATE_COMPLETE` or `UPDATE_COMPLETE`.
    ///
    /// "Not found" is a normal negative answer; any other registry failure
    /// is returned because neither answer can be assumed.
    pub fn unit_exists(&self, name: &str) -> Result<bool, RegistryError> {
        match self.registry.describe_unit(name) {
            Ok(status) => {
                tracing::debug!(unit = name, status = %status, "unit status");
                Ok(status.is_terminal_success())
            }
            Err(RegistryError::NotFound(_)) => {
                tracing::debug!(unit = name, "unit not found");
                Ok(false)
            }
            Err(e) => {
                tracing::error!(unit = name, error = %e, "failed to describe unit");
                Err(e)
            }
        }
    }

    /// Whether an export named `name` is published.
    ///
    /// Registry failures are logged and reported as absent.
    pub fn export_exists(&self, name: &str) -> bool {
        match self.registry.list_exports() {
            Ok(exports) => exports.contains(name),
            Err(e) => {
                tracing::warn!(export = name, error = %e, "failed to list exports");
                false
            }
        }
    }

    /// Check that `prerequisite` exists and publishes every required export.
    ///
    /// The unit is checked first; exports of a missing unit are never queried.
    /// Exports are checked in order and the first missing one is reported.
    pub fn validate_for_dependent_unit(
        &self,
        prerequisite: &Prerequisite,
    ) -> Result<(), ValidationError> {
        let exists = self.unit_exists(&prerequisite.unit).map_err(|source| {
            let message = remediation::registry_unreachable(&prerequisite.unit, &source.to_string());
            ValidationError::Transport {
                unit: prerequisite.unit.clone(),
                source,
                message,
            }
        })?;

        if !exists {
            return Err(ValidationError::UnitMissing {
                unit: prerequisite.unit.clone(),
                message: prerequisite.missing_message(),
            });
        }

        for export in &prerequisite.exports {
            if !self.export_exists(export) {
                return Err(ValidationError::UnitIncomplete {
                    unit: prerequisite.unit.clone(),
                    missing_export: export.clone(),
                    message: prerequisite.incomplete_message(export),
                });
            }
        }

        tracing::info!(
            unit = %prerequisite.unit,
            exports = prerequisite.exports.len(),
            "prerequisite satisfied"
        );
        Ok(())
    }

    /// Validate the prerequisites of a run given raw mode and tenant strings.
    ///
    /// An unknown mode fails before any registry query.
    pub fn validate_deploy_mode(&self, mode: &str, tenant: &str) -> Result<(), ValidationError> {
        let mode: DeployMode = mode
            .parse()
            .map_err(|e: crate::mode::ModeParseError| ValidationError::invalid_mode(&e.value))?;

        self.validate_mode(mode, tenant)
    }

    /// Validate the prerequisites of a run for already-parsed inputs.
    pub fn validate(&self, mode: DeployMode, tenants: &TenantList) -> Result<(), ValidationError> {
        self.validate_mode(mode, &tenants.to_string())
    }

    fn validate_mode(&self, mode: DeployMode, tenant: &str) -> Result<(), ValidationError> {
        tracing::info!(mode = %mode, tenant, "validating deployment dependencies");

        let prerequisite =
            Prerequisite::required_by(mode, tenant).map_err(ValidationError::invalid_tenant)?;

        match prerequisite {
            Some(prerequisite) => self.validate_for_dependent_unit(&prerequisite),
            None => Ok(()),
        }
    }
}
