use anyhow::{Context, Result};
use colored::Colorize;

use super::context::AppContext;

/// Show the hardware timer range and current resolution.
pub fn execute(ctx: &AppContext) -> Result<()> {
    let caps = ctx
        .backend()
        .timer_capabilities()
        .context("Failed to query timer resolution")?;

    println!("{}", "Timer resolution".cyan().bold());
    println!("  Finest:   {:.3} ms", caps.min_ms);
    println!("  Coarsest: {:.3} ms", caps.max_ms);
    println!("  Current:  {:.3} ms", caps.current_ms);
    Ok(())
}
