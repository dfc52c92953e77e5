use model::wire::WireError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// Transport-level failure talking to the search backend.
    #[error("Search request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Search backend returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode search response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Index '{index}' was not created: {reason}")]
    IndexCreation { index: String, reason: String },
}

#[derive(Debug, Error)]
pub enum PolicyError {
    /// Transport-level failure talking to the policy engine.
    #[error("Policy engine request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Policy engine returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to decode residual queries: {0}")]
    Decode(#[from] WireError),
}
