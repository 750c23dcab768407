use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use super::context::AppContext;

pub fn execute(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let backend = ctx.backend();

    match matches.subcommand() {
        Some(("list", _)) => {
            let plans = backend.power_plans().context("Failed to list power plans")?;
            println!("{}", "Power plans".cyan().bold());
            for plan in plans {
                let marker = if plan.active { "*".green().bold() } else { " ".normal() };
                println!("  {} {}  {}", marker, plan.guid.dimmed(), plan.name);
            }
            Ok(())
        }
        Some(("set", sub)) => {
            let guid = sub
                .get_one::<String>("guid")
                .context("GUID argument is required")?;
            backend
                .set_active_power_plan(guid)
                .with_context(|| format!("Failed to activate power plan {}", guid))?;
            ctx.print_recorded_calls();
            println!("{} {}", "Activated power plan".green(), guid.bold());
            Ok(())
        }
        _ => {
            println!("Use 'pctune power --help' for more information.");
            Ok(())
        }
    }
}
