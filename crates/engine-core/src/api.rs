//! JSON envelope of the posts API.
//!
//! Success bodies are `{"result": ...}`, failures
//! `{"error": {"code": ..., "message": ...}}`.

use crate::error::ServiceError;
use serde::Serialize;
use serde_json::json;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorCode {
    NotFound,
    ParseError,
    InternalError,
    NotAuthorized,
}

impl ApiErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorCode::NotFound => "not_found",
            ApiErrorCode::ParseError => "parse_error",
            ApiErrorCode::InternalError => "internal_error",
            ApiErrorCode::NotAuthorized => "not_authorized",
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ApiErrorCode::NotFound => 404,
            ApiErrorCode::ParseError => 400,
            ApiErrorCode::InternalError => 500,
            ApiErrorCode::NotAuthorized => 403,
        }
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&ServiceError> for ApiErrorCode {
    fn from(err: &ServiceError) -> Self {
        match err {
            ServiceError::NotAuthorized => ApiErrorCode::NotAuthorized,
            ServiceError::NotFound(_) => ApiErrorCode::NotFound,
            ServiceError::InvalidRequest(_) => ApiErrorCode::ParseError,
            ServiceError::Policy(_) | ServiceError::Translation(_) | ServiceError::Search(_) => {
                ApiErrorCode::InternalError
            }
        }
    }
}

/// A status code and JSON body, ready for any HTTP layer to write out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl ApiResponse {
    pub fn ok(result: serde_json::Value) -> Self {
        Self {
            status: 200,
            body: json!({ "result": result }),
        }
    }

    pub fn error(code: ApiErrorCode, message: Option<String>) -> Self {
        let mut error = serde_json::Map::new();
        error.insert("code".to_string(), json!(code));
        if let Some(message) = message {
            error.insert("message".to_string(), json!(message));
        }

        Self {
            status: code.status(),
            body: json!({ "error": error }),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl From<&ServiceError> for ApiResponse {
    fn from(err: &ServiceError) -> Self {
        let code = ApiErrorCode::from(err);
        let message = match err {
            ServiceError::NotAuthorized => None,
            other => Some(other.to_string()),
        };
        ApiResponse::error(code, message)
    }
}
