use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use super::provisioning_registry::{ProvisioningRegistry, RegistryError, UnitStatus};

/// A query issued against an [`InMemoryRegistry`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryQuery {
    DescribeUnit(String),
    ListExports,
}

/// In-memory registry for tests and offline runs.
///
/// Records every query so callers can assert what was asked and in which
/// order.
#[derive(Debug, Default)]
pub struct InMemoryRegistry {
    units: HashMap<String, UnitStatus>,
    exports: BTreeSet<String>,
    describe_failures: HashMap<String, String>,
    list_exports_failure: Option<String>,
    queries: RefCell<Vec<RegistryQuery>>,
}

impl InMemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unit(mut self, name: &str, status: UnitStatus) -> Self {
        self.units.insert(name.to_string(), status);
        self
    }

    pub fn with_exports<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exports.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn without_export(mut self, name: &str) -> Self {
        self.exports.remove(name);
        self
    }

    /// Make `describe_unit(name)` fail with a transport error.
    pub fn with_describe_failure(mut self, name: &str, message: &str) -> Self {
        self.describe_failures
            .insert(name.to_string(), message.to_string());
        self
    }

    /// Make every `list_exports` call fail with a transport error.
    pub fn with_list_exports_failure(mut self, message: &str) -> Self {
        self.list_exports_failure = Some(message.to_string());
        self
    }

    pub fn queries(&self) -> Vec<RegistryQuery> {
        self.queries.borrow().clone()
    }

    pub fn query_count(&self) -> usize {
        self.queries.borrow().len()
    }
}

impl ProvisioningRegistry for InMemoryRegistry {
    fn describe_unit(&self, name: &str) -> Result<UnitStatus, RegistryError> {
        self.queries
            .borrow_mut()
            .push(RegistryQuery::DescribeUnit(name.to_string()));

        if let Some(message) = self.describe_failures.get(name) {
            return Err(RegistryError::Transport(message.clone()));
        }

        self.units
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    fn list_exports(&self) -> Result<BTreeSet<String>, RegistryError> {
        self.queries.borrow_mut().push(RegistryQuery::ListExports);

        match &self.list_exports_failure {
            Some(message) => Err(RegistryError::Transport(message.clone())),
            None => Ok(self.exports.clone()),
        }
    }
}
