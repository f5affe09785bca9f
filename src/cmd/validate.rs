//! `stackgate validate`

use anyhow::Result;

use stackgate::config::DeployConfig;
use stackgate::ui::{self, colors};
use stackgate::validator::{Prerequisite, StackValidator};

pub fn cmd_validate(config: &DeployConfig) -> Result<()> {
    let validator = StackValidator::new(super::registry(config));
    validator.validate(config.mode, &config.tenants)?;

    if ui::is_quiet() {
        return Ok(());
    }

    let tenant = config.tenants.to_string();
    match Prerequisite::required_by(config.mode, &tenant)? {
        Some(prerequisite) => println!(
            "{} {} is deployed with {} required exports (mode {})",
            colors::success("✓"),
            colors::identifier(&prerequisite.unit),
            prerequisite.exports.len(),
            config.mode
        ),
        None => println!(
            "{} Mode {} has no prerequisites to check",
            colors::success("✓"),
            colors::identifier(config.mode.as_str())
        ),
    }

    Ok(())
}
