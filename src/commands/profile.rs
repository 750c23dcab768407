use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use super::context::AppContext;
use super::report::print_report;
use crate::core::profiles::{Profile, ProfileManager, ProfileType};

pub fn execute(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let manager = ctx.profile_manager()?;

    match matches.subcommand() {
        Some(("list", _)) => list(&manager),
        Some(("show", sub)) => show(&manager, required(sub, "name")?),
        Some(("save", sub)) => save(&manager, sub),
        Some(("delete", sub)) => {
            let name = required(sub, "name")?;
            manager
                .store()
                .delete(name)
                .with_context(|| format!("Failed to delete profile '{}'", name))?;
            println!("{} {}", "Deleted profile".green(), name.bold());
            Ok(())
        }
        Some(("apply", sub)) => {
            let name = required(sub, "name")?;
            let report = manager
                .apply_custom_profile(name)
                .with_context(|| format!("Failed to apply saved profile '{}'", name))?;
            print_report(ctx, &manager, &report)
        }
        _ => {
            println!("Use 'pctune profile --help' for more information.");
            Ok(())
        }
    }
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(name)
        .with_context(|| format!("{} argument is required", name))
}

fn list(manager: &ProfileManager) -> Result<()> {
    println!("{}", "Built-in profiles".cyan().bold());
    for profile in manager.registry().built_ins() {
        println!("  {}", profile.name);
    }

    let saved = manager.saved_profiles()?;
    println!();
    println!(
        "{} {}",
        "Saved profiles".cyan().bold(),
        format!("({})", manager.store().dir().display()).dimmed()
    );
    if saved.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for name in saved {
        println!("  {}", name);
    }
    Ok(())
}

fn show(manager: &ProfileManager, name: &str) -> Result<()> {
    let profile = match manager.registry().find(name) {
        Some(profile) => profile.clone(),
        None => manager
            .load_profile(name)
            .with_context(|| format!("Failed to load profile '{}'", name))?,
    };
    print_profile(&profile);
    Ok(())
}

fn save(manager: &ProfileManager, matches: &ArgMatches) -> Result<()> {
    let name = required(matches, "name")?;
    let from = required(matches, "from")?;

    let base: ProfileType = from.parse().map_err(anyhow::Error::msg)?;
    if !base.is_built_in() {
        bail!("--from must name a built-in profile (gaming, streaming, workstation, balanced)");
    }
    if manager.registry().find(name).is_some() {
        bail!("'{}' is reserved for a built-in profile", name);
    }

    let mut profile = manager.default_profile(base);
    profile.name = name.clone();
    manager
        .save_profile(name, &profile)
        .with_context(|| format!("Failed to save profile '{}'", name))?;

    println!(
        "{} {} {}",
        "Saved profile".green(),
        name.bold(),
        format!("(based on {})", base).dimmed()
    );
    Ok(())
}

fn print_profile(profile: &Profile) {
    let p = &profile.parameters;
    let untouched = || "unchanged".dimmed().to_string();
    let flag = |v: Option<bool>| {
        v.map_or_else(untouched, |on| {
            if on {
                "on".to_string()
            } else {
                "off".to_string()
            }
        })
    };

    println!("{} ({})", profile.name.cyan().bold(), profile.profile_type);
    println!("  Timer resolution:   {:.2} ms", p.timer_resolution_ms);
    println!("  Core parking:       {}", p.core_parking);
    println!("  Disable throttling: {}", p.disable_throttling);
    println!("  Network mode:       {}", p.network_mode);
    println!("  Priority class:     {:?}", p.priority_class);
    println!(
        "  Affinity:           {}",
        if p.affinity.is_all() {
            "all cores".to_string()
        } else {
            p.affinity.to_string()
        }
    );
    println!("  Foreground boost:   {}", flag(p.foreground_boost));
    println!("  Long quantum:       {}", flag(p.long_quantum));
    println!("  Variable quantum:   {}", flag(p.variable_quantum));
    println!(
        "  Memory priority:    {}",
        p.memory_priority
            .map_or_else(untouched, |m| format!("{:?}", m))
    );
    for route in &p.interrupt_routes {
        println!("  Interrupts:         {} -> core {}", route.category, route.core);
    }
}
