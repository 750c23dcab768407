use std::io;
use thiserror::Error;

/// Custom error type for pctune
#[derive(Error, Debug)]
pub enum TuneError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Profile error: {0}")]
    Profile(String),

    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for pctune
pub type Result<T> = std::result::Result<T, TuneError>;

impl TuneError {
    /// Create a profile error
    pub fn profile<S: Into<String>>(msg: S) -> Self {
        TuneError::Profile(msg.into())
    }

    pub fn profile_not_found<S: Into<String>>(name: S) -> Self {
        TuneError::ProfileNotFound(name.into())
    }

    /// Create a persistence error (malformed or out-of-range record)
    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        TuneError::Persistence(msg.into())
    }
}
