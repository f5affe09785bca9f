//! Deployment planning.
//!
//! Expands a mode and tenant list into the units a run deploys, with the
//! dependencies between them, and orders them so every unit comes after the
//! units it consumes exports from.

use serde::Serialize;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use crate::mode::DeployMode;
use crate::tenant::{TenantError, TenantId, TenantList};
use crate::units::{self, AiUnitKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanError {
    Tenant(TenantError),
    Cycle(Vec<String>),
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::Tenant(e) => write!(f, "{}", e),
            PlanError::Cycle(units) => {
                write!(f, "Circular unit dependency among: {}", units.join(", "))
            }
        }
    }
}

impl std::error::Error for PlanError {}

impl From<TenantError> for PlanError {
    fn from(e: TenantError) -> Self {
        PlanError::Tenant(e)
    }
}

/// A unit the plan deploys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedUnit {
    pub name: String,
    /// Units this one consumes exports from. May name units outside the plan.
    pub depends_on: Vec<String>,
}

impl PlannedUnit {
    pub fn new(name: impl Into<String>, depends_on: Vec<String>) -> Self {
        Self {
            name: name.into(),
            depends_on,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    pub mode: DeployMode,
    units: Vec<PlannedUnit>,
}

impl DeploymentPlan {
    /// Units deployed for `mode`, in declaration order.
    ///
    /// `ai` deploys a single tenant per run and rejects multi-tenant lists.
    pub fn for_mode(mode: DeployMode, tenants: &TenantList) -> Result<Self, PlanError> {
        let mut units = Vec::new();

        match mode {
            DeployMode::Network => units.push(network()),
            DeployMode::Legacy => {
                for tenant in tenants {
                    units.push(legacy(tenant));
                }
            }
            DeployMode::Ai => {
                let tenant = tenants.single()?;
                units.extend(ai(tenant));
            }
            DeployMode::All => {
                units.push(network());
                for tenant in tenants {
                    units.push(legacy(tenant));
                }
                for tenant in tenants {
                    units.extend(ai(tenant));
                }
            }
        }

        Ok(Self { mode, units })
    }

    /// Build a plan from explicit units.
    pub fn from_units(mode: DeployMode, units: Vec<PlannedUnit>) -> Self {
        Self { mode, units }
    }

    pub fn unit_names(&self) -> Vec<String> {
        self.units.iter().map(|u| u.name.clone()).collect()
    }

    /// Dependencies that are not deployed by this plan and must already exist.
    pub fn prerequisites(&self) -> Vec<String> {
        let planned: HashSet<&str> = self.units.iter().map(|u| u.name.as_str()).collect();
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for unit in &self.units {
            for dep in &unit.depends_on {
                if !planned.contains(dep.as_str()) && seen.insert(dep.as_str()) {
                    result.push(dep.clone());
                }
            }
        }

        result
    }

    /// Units in deployment order: dependencies before dependents.
    ///
    /// Ties keep declaration order. Dependencies outside the plan are ignored.
    pub fn ordered(&self) -> Result<Vec<&PlannedUnit>, PlanError> {
        let index: HashMap<&str, usize> = self
            .units
            .iter()
            .enumerate()
            .map(|(i, u)| (u.name.as_str(), i))
            .collect();

        // dep -> dependents (dep must come first)
        let mut dependents_of: Vec<Vec<usize>> = vec![Vec::new(); self.units.len()];
        let mut in_degree: Vec<usize> = vec![0; self.units.len()];

        for (i, unit) in self.units.iter().enumerate() {
            for dep in &unit.depends_on {
                if let Some(&d) = index.get(dep.as_str()) {
                    dependents_of[d].push(i);
                    in_degree[i] += 1;
                }
            }
        }

        // Kahn's algorithm
        let mut queue: VecDeque<usize> = (0..self.units.len())
            .filter(|&i| in_degree[i] == 0)
            .collect();
        let mut result = Vec::with_capacity(self.units.len());

        while let Some(node) = queue.pop_front() {
            result.push(&self.units[node]);
            for &dependent in &dependents_of[node] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        if result.len() == self.units.len() {
            Ok(result)
        } else {
            let stuck = (0..self.units.len())
                .filter(|&i| in_degree[i] > 0)
                .map(|i| self.units[i].name.clone())
                .collect();
            Err(PlanError::Cycle(stuck))
        }
    }
}

fn network() -> PlannedUnit {
    PlannedUnit::new(units::network_unit(), Vec::new())
}

fn legacy(tenant: &TenantId) -> PlannedUnit {
    PlannedUnit::new(units::legacy_unit(tenant), vec![units::network_unit()])
}

fn ai(tenant: &TenantId) -> Vec<PlannedUnit> {
    AiUnitKind::ALL
        .iter()
        .map(|kind| {
            let mut deps = vec![units::legacy_unit(tenant)];
            deps.extend(kind.depends_on().iter().map(|d| d.unit_name(tenant)));
            PlannedUnit::new(kind.unit_name(tenant), deps)
        })
        .collect()
}
