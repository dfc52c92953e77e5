//! Request layer for policy-filtered post searches.

pub mod api;
pub mod error;
pub mod request;
pub mod service;
pub mod settings;

pub use api::{ApiErrorCode, ApiResponse};
pub use error::{ServiceError, SettingsError};
pub use request::AccessRequest;
pub use service::PostsService;
pub use settings::Settings;
