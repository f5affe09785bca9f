//! # Stackgate - deployment dependency validation
//!
//! Stackgate guards a multi-tenant workshop deployment made of independently
//! deployable units: one shared network unit, one base unit per tenant and a
//! set of AI extension units per tenant. Before a deployment starts it checks
//! that the units it builds on already exist in a usable state and publish
//! the exports it imports, and fails with the exact command that fixes the
//! problem when they do not.
//!
//! ## Modules
//!
//! - [`validator`] - Prerequisite checks and validation errors
//! - [`registry`] - Provisioning registry abstraction (AWS CLI, in-memory)
//! - [`plan`] - Units deployed per mode, in dependency order
//! - [`units`] - Deterministic unit and export names
//! - [`mode`] - Deployment modes and wrapped `cdk` actions
//! - [`tenant`] - Tenant identifiers
//! - [`config`] - Typed configuration from flags, context, `cdk.json` and env
//! - [`remediation`] - Actionable error messages
//!
//! ## Example
//!
//! ```
//! use stackgate::registry::{InMemoryRegistry, UnitStatus};
//! use stackgate::units;
//! use stackgate::validator::StackValidator;
//!
//! let registry = InMemoryRegistry::new()
//!     .with_unit(units::NETWORK_UNIT, UnitStatus::CreateComplete)
//!     .with_exports(units::network_exports());
//!
//! let validator = StackValidator::new(registry);
//! assert!(validator.validate_deploy_mode("legacy", "demo").is_ok());
//! assert!(validator.validate_deploy_mode("bogus", "demo").is_err());
//! ```

pub mod config;
pub mod mode;
pub mod plan;
pub mod registry;
pub mod remediation;
pub mod tenant;
pub mod ui;
pub mod units;
pub mod validator;
