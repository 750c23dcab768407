//! Profile registry, persistence and the apply engine.

mod manager;
mod record;
mod registry;
mod report;
mod store;
mod types;

pub use manager::{ActivationPolicy, ApplyOptions, ProfileManager};
pub use record::ProfileRecord;
pub use registry::{default_parameters, default_profile, ProfileRegistry};
pub use report::{ApplyReport, SettingOutcome};
pub use store::{validate_profile_name, ProfileStore};
pub use types::{Profile, ProfileParameters, ProfileType};
