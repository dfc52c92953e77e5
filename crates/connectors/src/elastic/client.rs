use super::{
    post::{POSTS_INDEX_MAPPING, Post},
    query::ElasticQuery,
};
use crate::error::SearchError;
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &ElasticQuery) -> Result<Vec<Post>, SearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    hits: Hits,
}

#[derive(Debug, Deserialize)]
struct Hits {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source")]
    source: Post,
}

/// Extracts the `_source` documents of a search response.
pub fn parse_search_response(body: &str) -> Result<Vec<Post>, SearchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.hits.hits.into_iter().map(|hit| hit.source).collect())
}

/// HTTP client for one index of the search backend.
#[derive(Debug, Clone)]
pub struct ElasticClient {
    http: reqwest::Client,
    base_url: String,
    index: String,
}

impl ElasticClient {
    pub fn new(base_url: &str, index: &str, timeout: Duration) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            index: index.to_string(),
        })
    }

    pub fn index(&self) -> &str {
        &self.index
    }

    /// Creates the index with the posts mapping unless it already exists.
    /// Returns whether it was created.
    pub async fn ensure_index(&self) -> Result<bool, SearchError> {
        let url = self.url("");
        let exists = self.http.head(&url).send().await?;
        match exists.status() {
            StatusCode::NOT_FOUND => {}
            status if status.is_success() => return Ok(false),
            status => return Err(status_error(status, exists).await),
        }

        let mapping: serde_json::Value = serde_json::from_str(POSTS_INDEX_MAPPING)?;
        let response = self.http.put(&url).json(&mapping).send().await?;
        if !response.status().is_success() {
            return Err(status_error(response.status(), response).await);
        }

        let body: serde_json::Value = response.json().await?;
        if body["acknowledged"] != json!(true) {
            return Err(SearchError::IndexCreation {
                index: self.index.clone(),
                reason: "creation not acknowledged".to_string(),
            });
        }

        info!("Created index '{}'", self.index);
        Ok(true)
    }

    fn url(&self, endpoint: &str) -> String {
        if endpoint.is_empty() {
            format!("{}/{}", self.base_url, self.index)
        } else {
            format!("{}/{}/{}", self.base_url, self.index, endpoint)
        }
    }
}

#[async_trait]
impl SearchBackend for ElasticClient {
    async fn search(&self, query: &ElasticQuery) -> Result<Vec<Post>, SearchError> {
        debug!("Searching '{}' with {}", self.index, query);

        let response = self
            .http
            .post(self.url("_search"))
            .json(&json!({ "query": query }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(status_error(response.status(), response).await);
        }

        let body = response.text().await?;
        parse_search_response(&body)
    }
}

async fn status_error(status: StatusCode, response: reqwest::Response) -> SearchError {
    SearchError::Status {
        status: status.as_u16(),
        body: response.text().await.unwrap_or_default(),
    }
}
