// pctune library - public API

// Re-export error types
pub mod error;
pub use error::{Result, TuneError};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;

// Re-export commonly used types
pub use core::config::Config;

/// Initialize logging. `RUST_LOG` overrides `default_level`.
pub fn init_logging(default_level: &str) {
    let level = default_level
        .parse::<log::LevelFilter>()
        .unwrap_or(log::LevelFilter::Info);

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}
