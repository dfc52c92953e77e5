use crate::combinator::MalformedPolicy;
use serde::{Deserialize, Serialize};

/// Settings the translator is constructed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// First segment of every reference, `data` for documents.
    pub root: String,
    /// The relation under protection. References to any other relation are
    /// malformed.
    pub relation: String,
    pub malformed: MalformedPolicy,
}

impl TranslatorConfig {
    pub fn for_relation(relation: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            ..Self::default()
        }
    }

    pub fn strict(mut self) -> Self {
        self.malformed = MalformedPolicy::Reject;
        self
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            root: "data".to_string(),
            relation: "posts".to_string(),
            malformed: MalformedPolicy::Skip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: TranslatorConfig =
            serde_json::from_str(r#"{"relation": "articles", "malformed": "reject"}"#).unwrap();
        assert_eq!(config.root, "data");
        assert_eq!(config.relation, "articles");
        assert_eq!(config.malformed, MalformedPolicy::Reject);
    }

    #[test]
    fn test_builders() {
        let config = TranslatorConfig::for_relation("articles").strict();
        assert_eq!(config.relation, "articles");
        assert_eq!(config.malformed, MalformedPolicy::Reject);
    }
}
