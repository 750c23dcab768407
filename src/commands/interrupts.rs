use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use super::context::AppContext;
use crate::core::tuning::DeviceCategory;

pub fn execute(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let Some(("route", sub)) = matches.subcommand() else {
        println!("Use 'pctune interrupts --help' for more information.");
        return Ok(());
    };

    let category: DeviceCategory = sub
        .get_one::<String>("category")
        .context("Category argument is required")?
        .parse()
        .map_err(anyhow::Error::msg)?;
    let core = *sub.get_one::<u32>("core").context("Core argument is required")?;

    ctx.backend()
        .route_interrupts(category, core)
        .with_context(|| format!("Failed to route {} interrupts to core {}", category, core))?;

    ctx.print_recorded_calls();
    println!(
        "{} {} interrupts to core {} {}",
        "Routed".green(),
        category,
        core,
        "(takes effect after a device restart or reboot)".dimmed()
    );
    Ok(())
}
