//! Error types for the droidsign core library.

use thiserror::Error;

/// Core error type for droidsign operations.
#[derive(Error, Debug)]
pub enum DroidsignError {
    #[error(
        "Missing external build property '{key}': when MYAPP_RELEASE_STORE_FILE is set, \
         all four MYAPP_RELEASE_* properties must be supplied together"
    )]
    MissingProperty { key: &'static str },

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias for droidsign operations.
pub type Result<T> = std::result::Result<T, DroidsignError>;
