//! Tenant identifiers.
//!
//! A tenant is one workshop participant. Its identifier prefixes every
//! per-tenant unit and export name, so it has to stay a valid stack name
//! fragment.

use std::fmt::{self, Display, Formatter};

/// Separator for multi-tenant identifiers (`alice,bob`).
pub const TENANT_SEPARATOR: char = ',';

/// Longest accepted tenant identifier. The longest derived unit name
/// (`<tenant>-MedicalReportsLegacyStack`) must fit the 128 char stack name limit.
pub const MAX_TENANT_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TenantError {
    Empty,
    InvalidStart(String),
    InvalidChar { tenant: String, ch: char },
    TooLong(String),
    Duplicate(String),
    NotSingle(Vec<String>),
}

impl Display for TenantError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            TenantError::Empty => write!(f, "Tenant identifier is empty"),
            TenantError::InvalidStart(t) => {
                write!(f, "Tenant identifier \"{}\" must start with a letter", t)
            }
            TenantError::InvalidChar { tenant, ch } => write!(
                f,
                "Tenant identifier \"{}\" contains '{}' (only letters, digits and '-' are allowed)",
                tenant, ch
            ),
            TenantError::TooLong(t) => write!(
                f,
                "Tenant identifier \"{}\" is longer than {} characters",
                t, MAX_TENANT_LEN
            ),
            TenantError::Duplicate(t) => {
                write!(f, "Tenant identifier \"{}\" is listed more than once", t)
            }
            TenantError::NotSingle(tenants) => write!(
                f,
                "Expected exactly one tenant, got {} ({}). AI units are deployed one tenant at a time",
                tenants.len(),
                tenants.join(", ")
            ),
        }
    }
}

impl std::error::Error for TenantError {}

/// A single validated tenant identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TenantId(String);

impl TenantId {
    pub fn parse(raw: &str) -> Result<Self, TenantError> {
        let value = raw.trim();
        let mut chars = value.chars();
        let first = chars.next().ok_or(TenantError::Empty)?;

        if !first.is_ascii_alphabetic() {
            return Err(TenantError::InvalidStart(value.to_string()));
        }
        if let Some(ch) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '-')) {
            return Err(TenantError::InvalidChar {
                tenant: value.to_string(),
                ch,
            });
        }
        if value.len() > MAX_TENANT_LEN {
            return Err(TenantError::TooLong(value.to_string()));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TenantId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One or more tenants, in the order they were given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantList(Vec<TenantId>);

impl TenantList {
    /// Parse a possibly comma-delimited identifier. Blank entries are skipped.
    pub fn parse(raw: &str) -> Result<Self, TenantError> {
        let mut tenants: Vec<TenantId> = Vec::new();

        for part in raw.split(TENANT_SEPARATOR) {
            if part.trim().is_empty() {
                continue;
            }
            let tenant = TenantId::parse(part)?;
            if tenants.contains(&tenant) {
                return Err(TenantError::Duplicate(tenant.0));
            }
            tenants.push(tenant);
        }

        if tenants.is_empty() {
            return Err(TenantError::Empty);
        }

        Ok(Self(tenants))
    }

    /// The sole tenant, or an error when several were given.
    pub fn single(&self) -> Result<&TenantId, TenantError> {
        match self.0.as_slice() {
            [tenant] => Ok(tenant),
            many => Err(TenantError::NotSingle(
                many.iter().map(|t| t.0.clone()).collect(),
            )),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TenantId> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Display for TenantList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(TenantId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

impl<'a> IntoIterator for &'a TenantList {
    type Item = &'a TenantId;
    type IntoIter = std::slice::Iter<'a, TenantId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
