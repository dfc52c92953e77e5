use connectors::{PolicyError, SearchError};
use thiserror::Error;
use translator::TranslationError;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        key: String,
        value: String,
        expected: String,
    },

    #[error("Failed to build {client} client: {message}")]
    Client { client: String, message: String },
}

/// Errors of a filtered search request.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Principal is not authorized for this request")]
    NotAuthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Policy evaluation failed: {0}")]
    Policy(#[from] PolicyError),

    #[error("Failed to translate residual policy: {0}")]
    Translation(#[from] TranslationError),

    #[error("Search failed: {0}")]
    Search(#[from] SearchError),
}
