// Command handlers module
pub mod analyze;
pub mod apply;
pub mod config;
pub mod context;
pub mod interrupts;
pub mod layout;
pub mod memory;
pub mod monitor;
pub mod power;
pub mod profile;
pub mod report;
pub mod timer;

pub use context::AppContext;
