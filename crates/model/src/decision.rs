use crate::filter::FilterTree;
use serde::Serialize;
use std::fmt;

/// Outcome of translating a residual set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", content = "filter", rename_all = "snake_case")]
pub enum Decision {
    /// No branch of the policy can hold.
    Denied,
    /// Some branch holds without further conditions.
    Allowed,
    /// Access depends on document fields.
    Conditional(FilterTree),
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Denied => write!(f, "denied"),
            Decision::Allowed => write!(f, "allowed"),
            Decision::Conditional(tree) => write!(f, "conditional {tree}"),
        }
    }
}
