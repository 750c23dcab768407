// Core business logic module

pub mod analyzer;
pub mod config;
pub mod layout;
pub mod profiles;
pub mod telemetry;
pub mod tuning;

// Re-export commonly used items
pub use analyzer::{SystemAnalysisResult, SystemAnalyzer};
pub use config::Config;
pub use layout::DashboardLayout;
pub use profiles::{ApplyReport, ProfileManager, ProfileType};
