//! Error types for the core library.

use thiserror::Error;

/// Errors that can occur outside page view state.
#[derive(Debug, Error)]
pub enum Error {
    /// API call failed.
    #[error("API error: {0}")]
    Api(#[from] campusly_api::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential storage error.
    #[error("Credential error: {0}")]
    Credential(#[from] crate::credentials::CredentialError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
