use crate::error::SettingsError;
use connectors::{
    elastic::ElasticClient,
    opa::{DEFAULT_QUERY, OpaClient},
};
use std::{collections::HashMap, time::Duration};
use translator::{MalformedPolicy, TranslatorConfig};

/// Runtime settings, read from environment-style variables.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub opa_url: String,
    pub es_url: String,
    pub es_index: String,
    pub policy_query: String,
    pub translator: TranslatorConfig,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            opa_url: "http://localhost:8181".to_string(),
            es_url: "http://localhost:9200".to_string(),
            es_index: "posts".to_string(),
            policy_query: DEFAULT_QUERY.to_string(),
            translator: TranslatorConfig::default(),
            request_timeout: Duration::from_millis(5000),
        }
    }
}

impl Settings {
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, SettingsError> {
        let mut settings = Settings::default();

        if let Some(url) = vars.get("OPA_URL") {
            settings.opa_url = url.clone();
        }
        if let Some(url) = vars.get("ES_URL") {
            settings.es_url = url.clone();
        }
        if let Some(index) = vars.get("ES_INDEX") {
            settings.es_index = index.clone();
        }
        if let Some(query) = vars.get("POLICY_QUERY") {
            settings.policy_query = query.clone();
        }
        if let Some(relation) = vars.get("PROTECTED_RELATION") {
            settings.translator.relation = relation.clone();
        }
        if let Some(value) = vars.get("STRICT_TRANSLATION") {
            settings.translator.malformed = if parse_bool("STRICT_TRANSLATION", value)? {
                MalformedPolicy::Reject
            } else {
                MalformedPolicy::Skip
            };
        }
        if let Some(value) = vars.get("REQUEST_TIMEOUT_MS") {
            let millis = value.parse::<u64>().map_err(|_| invalid(
                "REQUEST_TIMEOUT_MS",
                value,
                "milliseconds as an unsigned integer",
            ))?;
            settings.request_timeout = Duration::from_millis(millis);
        }

        Ok(settings)
    }

    pub fn opa_client(&self) -> Result<OpaClient, SettingsError> {
        OpaClient::new(&self.opa_url, self.request_timeout).map_err(|err| SettingsError::Client {
            client: "policy engine".to_string(),
            message: err.to_string(),
        })
    }

    pub fn elastic_client(&self) -> Result<ElasticClient, SettingsError> {
        ElasticClient::new(&self.es_url, &self.es_index, self.request_timeout).map_err(|err| {
            SettingsError::Client {
                client: "search".to_string(),
                message: err.to_string(),
            }
        })
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(invalid(key, value, "a boolean")),
    }
}

fn invalid(key: &str, value: &str, expected: &str) -> SettingsError {
    SettingsError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        expected: expected.to_string(),
    }
}
