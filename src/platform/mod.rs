// Platform-specific code module

pub mod elevation;
pub mod tuning;

pub use elevation::{elevation_hint, is_elevated};
pub use tuning::{default_backend, UnsupportedBackend};
