use anyhow::{Context, Result};
use clap::ArgMatches;

use super::context::AppContext;
use super::report::print_report;
use crate::core::profiles::{ApplyOptions, ProfileType};

/// Apply a built-in profile by type, or a saved profile by name.
pub fn execute(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let name = matches
        .get_one::<String>("profile")
        .context("Profile argument is required")?;

    let options = ApplyOptions {
        target_pid: matches.get_one::<u32>("pid").copied(),
    };

    let manager = ctx.profile_manager()?;
    let report = match name.parse::<ProfileType>() {
        Ok(profile_type) if profile_type.is_built_in() => manager
            .apply_profile_with(profile_type, &options)
            .with_context(|| format!("Failed to apply profile '{}'", name))?,
        _ => manager
            .apply_custom_profile_with(name, &options)
            .with_context(|| format!("Failed to apply saved profile '{}'", name))?,
    };

    print_report(ctx, &manager, &report)
}
