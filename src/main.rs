use anyhow::Result;
use clap::{Arg, ArgAction, Command};

use pctune::commands::{self, AppContext};
use pctune::core::config::Config;

fn build_cli() -> Command {
    Command::new("pctune")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Profile-driven system tuning: analyze load, apply gaming/streaming/workstation profiles")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable debug logging")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Record tuning calls instead of changing the system")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(
            Command::new("analyze")
                .about("Analyze current load and recommend a profile")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the analysis as JSON")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("apply")
                        .long("apply")
                        .help("Apply the top auto-applicable recommendation")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("apply")
                .about("Apply a built-in profile (gaming, streaming, workstation, balanced) or a saved one")
                .arg(
                    Arg::new("profile")
                        .help("Profile type or saved profile name")
                        .required(true)
                        .index(1),
                )
                .arg(
                    Arg::new("pid")
                        .long("pid")
                        .value_name("PID")
                        .help("Also tune priority, affinity and memory priority of this process")
                        .value_parser(clap::value_parser!(u32)),
                ),
        )
        .subcommand(
            Command::new("profile")
                .about("Manage saved profiles")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("list").about("List built-in and saved profiles"))
                .subcommand(
                    Command::new("show")
                        .about("Show the settings of a profile")
                        .arg(Arg::new("name").required(true).index(1)),
                )
                .subcommand(
                    Command::new("save")
                        .about("Save a new profile based on a built-in one")
                        .arg(Arg::new("name").required(true).index(1))
                        .arg(
                            Arg::new("from")
                                .long("from")
                                .value_name("TYPE")
                                .help("Built-in profile to copy")
                                .default_value("balanced"),
                        ),
                )
                .subcommand(
                    Command::new("apply")
                        .about("Apply a saved profile")
                        .arg(Arg::new("name").required(true).index(1)),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a saved profile")
                        .arg(Arg::new("name").required(true).index(1)),
                ),
        )
        .subcommand(
            Command::new("monitor")
                .about("Show live telemetry until Ctrl+C")
                .arg(
                    Arg::new("interval")
                        .short('i')
                        .long("interval")
                        .value_name("MS")
                        .help("Polling interval in milliseconds (100-5000)")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Emit one JSON snapshot per line")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("power")
                .about("List or switch power plans")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("list").about("List power plans"))
                .subcommand(
                    Command::new("set")
                        .about("Activate a power plan")
                        .arg(Arg::new("guid").required(true).index(1)),
                ),
        )
        .subcommand(Command::new("timer").about("Show timer resolution range"))
        .subcommand(
            Command::new("interrupts")
                .about("Interrupt affinity")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("route")
                        .about("Route a device family's interrupts to one core")
                        .arg(
                            Arg::new("category")
                                .required(true)
                                .index(1)
                                .value_parser(["gpu", "network", "usb"]),
                        )
                        .arg(
                            Arg::new("core")
                                .required(true)
                                .index(2)
                                .value_parser(clap::value_parser!(u32)),
                        ),
                ),
        )
        .subcommand(
            Command::new("memory")
                .about("Memory maintenance")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("clear-standby").about("Purge the standby page list"))
                .subcommand(
                    Command::new("trim")
                        .about("Empty the working set of a process")
                        .arg(
                            Arg::new("pid")
                                .required(true)
                                .index(1)
                                .value_parser(clap::value_parser!(u32)),
                        ),
                ),
        )
        .subcommand(
            Command::new("layout")
                .about("Dashboard widget layout")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Show the saved layout"))
                .subcommand(Command::new("reset").about("Restore the default layout"))
                .subcommand(Command::new("arrange").about("Flow visible widgets into a grid")),
        )
        .subcommand(
            Command::new("config")
                .about("Show or change configuration")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(Command::new("show").about("Print the configuration"))
                .subcommand(
                    Command::new("set-interval")
                        .about("Set the telemetry polling interval")
                        .arg(
                            Arg::new("ms")
                                .required(true)
                                .index(1)
                                .value_parser(clap::value_parser!(u64)),
                        ),
                ),
        )
}

fn main() -> Result<()> {
    let matches = build_cli().get_matches();

    let mut config = Config::load()?;
    let level = if matches.get_flag("verbose") {
        "debug"
    } else {
        config.log_level.as_str()
    };
    pctune::init_logging(level);

    if let Some(("config", sub)) = matches.subcommand() {
        return match sub.subcommand() {
            Some(("set-interval", set)) => commands::config::handle_set_interval(&mut config, set),
            _ => commands::config::handle_show(&config),
        };
    }

    let ctx = AppContext::new(config, matches.get_flag("dry-run"));

    match matches.subcommand() {
        Some(("analyze", sub)) => commands::analyze::execute(&ctx, sub),
        Some(("apply", sub)) => commands::apply::execute(&ctx, sub),
        Some(("profile", sub)) => commands::profile::execute(&ctx, sub),
        Some(("monitor", sub)) => commands::monitor::execute(&ctx, sub),
        Some(("power", sub)) => commands::power::execute(&ctx, sub),
        Some(("timer", _)) => commands::timer::execute(&ctx),
        Some(("interrupts", sub)) => commands::interrupts::execute(&ctx, sub),
        Some(("memory", sub)) => commands::memory::execute(&ctx, sub),
        Some(("layout", sub)) => commands::layout::execute(&ctx, sub),
        _ => Ok(()),
    }
}
