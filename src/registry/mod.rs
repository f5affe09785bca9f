//! Provisioning registry access.
//!
//! The registry is the control plane that tracks deployment units and their
//! exports. Only two read operations are needed: describe a unit's status
//! and list the global export names.

pub mod aws_cli;
pub mod in_memory;
pub mod provisioning_registry;

pub use aws_cli::AwsCliRegistry;
pub use in_memory::{InMemoryRegistry, RegistryQuery};
pub use provisioning_registry::{ProvisioningRegistry, RegistryError, UnitStatus};
