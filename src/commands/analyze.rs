use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;
use std::sync::Arc;

use super::context::AppContext;
use super::report::print_report;
use crate::core::analyzer::SystemAnalysisResult;
use crate::core::telemetry::{sample_once, TelemetryStore};

pub fn execute(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let json = matches.get_flag("json");
    let apply = matches.get_flag("apply");

    let store = Arc::new(TelemetryStore::new());
    sample_once(&store);

    let analyzer = ctx.analyzer(store);
    let result = analyzer.analyze_system();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to serialize analysis")?
        );
    } else {
        print_analysis(&result);
    }

    if !apply {
        return Ok(());
    }

    let suggestion = result
        .recommendations
        .iter()
        .filter(|r| r.can_auto_apply)
        .find_map(|r| r.suggested_profile().map(|p| (r, p)));

    let Some((recommendation, profile_type)) = suggestion else {
        println!();
        println!("{}", "No recommendation can be applied automatically.".dimmed());
        return Ok(());
    };

    println!();
    println!(
        "{} {}",
        "Acting on:".cyan().bold(),
        recommendation.title
    );
    let manager = ctx.profile_manager()?;
    let report = manager
        .apply_profile(profile_type)
        .with_context(|| format!("Failed to apply {} profile", profile_type))?;
    print_report(ctx, &manager, &report)
}

fn print_analysis(result: &SystemAnalysisResult) {
    println!("{}", "System Analysis".cyan().bold());
    println!("  CPU usage:    {:.1}%", result.cpu_usage_percent);
    println!("  RAM usage:    {:.1}%", result.ram_usage_percent);
    println!("  Processes:    {}", result.process_count);
    println!("  Gaming:       {}", yes_no(result.has_gaming_process));
    println!("  Streaming:    {}", yes_no(result.has_streaming_process));
    println!();

    if result.recommendations.is_empty() {
        println!("{}", "No recommendations.".green());
        return;
    }

    println!("{}", "Recommendations".cyan().bold());
    for rec in &result.recommendations {
        let auto = if rec.can_auto_apply {
            " [auto]".green().to_string()
        } else {
            String::new()
        };
        println!("  {:>2}  {}{}", rec.priority, rec.title.bold(), auto);
        println!("      {}", rec.description.dimmed());
    }
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value {
        "yes".green()
    } else {
        "no".normal()
    }
}
