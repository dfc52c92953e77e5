//! Client for the policy engine's partial evaluation (compile) API.

use crate::error::PolicyError;
use async_trait::async_trait;
use model::{ResidualSet, wire};
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_QUERY: &str = "data.example.allow == true";

/// A partial evaluation request: resolve `query` for `input`, leaving the
/// `unknowns` as residual conditions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompileRequest {
    pub query: String,
    pub input: serde_json::Value,
    pub unknowns: Vec<String>,
}

impl CompileRequest {
    pub fn new(query: impl Into<String>, input: serde_json::Value, relation: &str) -> Self {
        Self {
            query: query.into(),
            input,
            unknowns: vec![format!("data.{relation}")],
        }
    }
}

#[async_trait]
pub trait PolicyEngine: Send + Sync {
    async fn compile(&self, request: &CompileRequest) -> Result<ResidualSet, PolicyError>;
}

#[derive(Debug, Clone)]
pub struct OpaClient {
    http: reqwest::Client,
    base_url: String,
}

impl OpaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, PolicyError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn compile_url(&self) -> String {
        format!("{}/v1/compile", self.base_url)
    }
}

#[async_trait]
impl PolicyEngine for OpaClient {
    async fn compile(&self, request: &CompileRequest) -> Result<ResidualSet, PolicyError> {
        let response = self
            .http
            .post(self.compile_url())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(PolicyError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let residuals = wire::decode_compile_response(&body)?;
        debug!(
            "Partial evaluation of '{}' left {} residual clause(s)",
            request.query,
            residuals.len()
        );
        Ok(residuals)
    }
}
