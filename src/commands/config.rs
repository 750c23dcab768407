use crate::core::Config;
use anyhow::{Context, Result};
use colored::Colorize;

pub fn handle_show(config: &Config) -> Result<()> {
    let path = Config::get_config_path()?;
    println!("{} {}", "Configuration".cyan().bold(), format!("({})", path.display()).dimmed());
    println!(
        "{}",
        serde_json::to_string_pretty(config).context("Failed to serialize config")?
    );
    Ok(())
}

pub fn handle_set_interval(config: &mut Config, matches: &clap::ArgMatches) -> Result<()> {
    let requested = *matches
        .get_one::<u64>("ms")
        .context("Interval argument is required")?;

    let applied = config.set_polling_interval(requested);
    config.save()?;

    if applied != requested {
        println!(
            "{} {} ms {}",
            "Polling interval set to".green(),
            applied,
            format!("(clamped from {} ms)", requested).yellow()
        );
    } else {
        println!("{} {} ms", "Polling interval set to".green(), applied);
    }
    Ok(())
}
