//! `stackgate plan`

use anyhow::Result;
use serde_json::json;

use stackgate::config::DeployConfig;
use stackgate::plan::DeploymentPlan;
use stackgate::ui::{colors, format};

pub fn cmd_plan(config: &DeployConfig, as_json: bool) -> Result<()> {
    let plan = DeploymentPlan::for_mode(config.mode, &config.tenants)?;
    let ordered = plan.ordered()?;
    let prerequisites = plan.prerequisites();

    if as_json {
        let tenants: Vec<&str> = config.tenants.iter().map(|t| t.as_str()).collect();
        let output = json!({
            "mode": config.mode,
            "tenants": tenants,
            "region": config.region,
            "units": ordered,
            "prerequisites": prerequisites,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!(
        "{} mode {} · tenants {} · region {}",
        colors::heading("Deployment plan:"),
        colors::identifier(config.mode.as_str()),
        colors::identifier(&config.tenants.to_string()),
        config.region
    );
    println!("{}", colors::secondary(&format::separator(60)));

    for (i, unit) in ordered.iter().enumerate() {
        if unit.depends_on.is_empty() {
            println!("{:>3}. {}", i + 1, colors::identifier(&unit.name));
        } else {
            println!(
                "{:>3}. {}  {}",
                i + 1,
                colors::identifier(&unit.name),
                colors::secondary(&format!("← {}", format::name_list(&unit.depends_on, 2)))
            );
        }
    }

    if !prerequisites.is_empty() {
        println!();
        println!("{}", colors::heading("Must already be deployed:"));
        for unit in &prerequisites {
            println!("  - {}", colors::warning(unit));
        }
    }

    Ok(())
}
