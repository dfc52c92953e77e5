use connectors::SearchError;
use engine_core::SettingsError;
use model::wire::WireError;
use thiserror::Error;
use translator::TranslationError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read input file: {0}")]
    InputRead(#[from] std::io::Error),

    #[error("Failed to decode compile response: {0}")]
    Decode(#[from] WireError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("Translation failed: {0}")]
    Translation(#[from] TranslationError),

    #[error("Invalid settings: {0}")]
    Settings(#[from] SettingsError),

    #[error("Search backend error: {0}")]
    Search(#[from] SearchError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Request failed with status {0}")]
    RequestFailed(u16),
}
