use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use super::context::AppContext;
use crate::core::layout::DashboardLayout;

pub fn execute(ctx: &AppContext, matches: &ArgMatches) -> Result<()> {
    let path = ctx.config.layout_path()?;

    match matches.subcommand() {
        Some(("show", _)) => {
            let layout = DashboardLayout::load_or_default(&path);
            print_layout(&layout);
            println!("{}", format!("({})", path.display()).dimmed());
            Ok(())
        }
        Some(("reset", _)) => {
            DashboardLayout::default()
                .save(&path)
                .with_context(|| format!("Failed to write layout {:?}", path))?;
            println!("{}", "Dashboard layout reset to defaults".green());
            Ok(())
        }
        Some(("arrange", _)) => {
            let mut layout = DashboardLayout::load_or_default(&path);
            layout.auto_arrange();
            layout
                .save(&path)
                .with_context(|| format!("Failed to write layout {:?}", path))?;
            print_layout(&layout);
            Ok(())
        }
        _ => {
            println!("Use 'pctune layout --help' for more information.");
            Ok(())
        }
    }
}

fn print_layout(layout: &DashboardLayout) {
    println!("{} {}", "Dashboard layout".cyan().bold(), format!("v{}", layout.version).dimmed());
    for widget in &layout.widgets {
        let state = if widget.visible { "visible".green() } else { "hidden".dimmed() };
        println!(
            "  {:<15} {:<14} at ({:>6.0}, {:>6.0})  size {:>5.0}x{:<5.0} {}",
            widget.id,
            widget.title,
            widget.position[0],
            widget.position[1],
            widget.size[0],
            widget.size[1],
            state
        );
    }
}
