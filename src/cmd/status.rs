//! `stackgate status`

use anyhow::Result;
use colored::Colorize;

use stackgate::config::DeployConfig;
use stackgate::plan::DeploymentPlan;
use stackgate::registry::{ProvisioningRegistry, RegistryError};
use stackgate::ui::{self, colors, format};

pub fn cmd_status(config: &DeployConfig) -> Result<()> {
    let plan = DeploymentPlan::for_mode(config.mode, &config.tenants)?;
    let registry = super::registry(config);

    let mut rows: Vec<(String, bool)> = plan
        .prerequisites()
        .into_iter()
        .map(|name| (name, true))
        .collect();
    rows.extend(plan.ordered()?.into_iter().map(|u| (u.name.clone(), false)));

    println!(
        "{} mode {} · region {}",
        colors::heading("Unit status:"),
        colors::identifier(config.mode.as_str()),
        registry.region()
    );
    println!("{}", colors::secondary(&format::separator(60)));

    let mut unreachable = 0;
    for (name, is_prerequisite) in &rows {
        let marker = if *is_prerequisite {
            colors::secondary(" (prerequisite)")
        } else {
            colors::secondary("")
        };

        match registry.describe_unit(name) {
            Ok(status) => println!(
                "{} {:<44} {}{}",
                ui::status_icon(&status),
                name,
                status,
                marker
            ),
            Err(RegistryError::NotFound(_)) => println!(
                "{} {:<44} {}{}",
                "○".dimmed(),
                name,
                colors::secondary("NOT_FOUND"),
                marker
            ),
            Err(e) => {
                unreachable += 1;
                println!("{} {:<44} {}", "✗".red(), name, colors::error(&e.to_string()));
            }
        }
    }

    if unreachable > 0 {
        anyhow::bail!(
            "{} of {} units could not be checked in region {}",
            unreachable,
            rows.len(),
            registry.region()
        );
    }

    Ok(())
}
