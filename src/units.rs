//! Deployment unit and export naming.
//!
//! Every unit name and export name used by the planner and the validator
//! comes from here, so the name a prerequisite check looks for is always the
//! name the deployment creates.

use crate::tenant::TenantId;

/// Name of the shared network unit.
pub const NETWORK_UNIT: &str = "PulsoSaludNetworkStack";

const LEGACY_UNIT_SUFFIX: &str = "MedicalReportsLegacyStack";

/// Exports published by the network unit that base units consume.
const NETWORK_EXPORT_SUFFIXES: [&str; 3] = ["VpcId", "PrivateSubnetIds", "IsolatedSubnetIds"];

/// Exports published by a tenant's base unit that AI units consume.
const LEGACY_EXPORT_SUFFIXES: [&str; 5] = [
    "BucketName",
    "VpcId",
    "PrivateSubnetIds",
    "DbSecretArn",
    "DbClusterArn",
];

pub fn network_unit() -> String {
    NETWORK_UNIT.to_string()
}

/// Base ("legacy") unit for one tenant.
pub fn legacy_unit(tenant: &TenantId) -> String {
    format!("{}-{}", tenant, LEGACY_UNIT_SUFFIX)
}

/// Network exports required before any base unit is deployed.
pub fn network_exports() -> Vec<String> {
    NETWORK_EXPORT_SUFFIXES
        .iter()
        .map(|suffix| format!("{}-{}", NETWORK_UNIT, suffix))
        .collect()
}

/// Base unit exports required before a tenant's AI units are deployed.
///
/// Tenant exports are namespaced by tenant, not by unit name.
pub fn legacy_exports(tenant: &TenantId) -> Vec<String> {
    LEGACY_EXPORT_SUFFIXES
        .iter()
        .map(|suffix| format!("{}-{}", tenant, suffix))
        .collect()
}

/// The AI extension units deployed per tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AiUnitKind {
    Extraction,
    Rag,
    Classification,
    Summary,
    Email,
}

impl AiUnitKind {
    /// Declaration order; also the order units are listed in a plan.
    pub const ALL: [AiUnitKind; 5] = [
        AiUnitKind::Extraction,
        AiUnitKind::Rag,
        AiUnitKind::Classification,
        AiUnitKind::Summary,
        AiUnitKind::Email,
    ];

    fn suffix(&self) -> &'static str {
        match self {
            AiUnitKind::Extraction => "AIExtractionStack",
            AiUnitKind::Rag => "AIRAGStack",
            AiUnitKind::Classification => "AIClassificationStack",
            AiUnitKind::Summary => "AISummaryStack",
            AiUnitKind::Email => "AIEmailStack",
        }
    }

    pub fn unit_name(&self, tenant: &TenantId) -> String {
        format!("{}-{}", tenant, self.suffix())
    }

    /// Sibling AI units this one needs deployed first.
    ///
    /// Classification and summary load the similarity search layer the RAG
    /// unit publishes.
    pub fn depends_on(&self) -> &'static [AiUnitKind] {
        match self {
            AiUnitKind::Classification | AiUnitKind::Summary => &[AiUnitKind::Rag],
            AiUnitKind::Extraction | AiUnitKind::Rag | AiUnitKind::Email => &[],
        }
    }
}

/// All AI unit names for a tenant, in declaration order.
pub fn ai_units(tenant: &TenantId) -> Vec<String> {
    AiUnitKind::ALL.iter().map(|k| k.unit_name(tenant)).collect()
}
