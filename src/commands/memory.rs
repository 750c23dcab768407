use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use super::context::AppContext;

pub fn execute(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let backend = ctx.backend();

    match matches.subcommand() {
        Some(("clear-standby", _)) => {
            backend
                .clear_standby_list()
                .context("Failed to clear the standby list")?;
            ctx.print_recorded_calls();
            println!("{}", "Standby list cleared".green());
            Ok(())
        }
        Some(("trim", sub)) => {
            let pid = *sub.get_one::<u32>("pid").context("PID argument is required")?;
            backend
                .empty_working_set(pid)
                .with_context(|| format!("Failed to trim working set of process {}", pid))?;
            ctx.print_recorded_calls();
            println!("{} {}", "Trimmed working set of process".green(), pid);
            Ok(())
        }
        _ => {
            println!("Use 'pctune memory --help' for more information.");
            Ok(())
        }
    }
}
