use serde::{Deserialize, Serialize};
use std::fmt;

/// A reference path split into the protected relation and the field read
/// from each of its documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldReference {
    pub relation: String,
    pub field: String,
}

impl FieldReference {
    pub fn new(relation: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            relation: relation.into(),
            field: field.into(),
        }
    }
}

impl fmt::Display for FieldReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.relation, self.field)
    }
}
