use serde::{Deserialize, Serialize};
use std::fmt;

/// One operand of a residual expression, in the policy engine's text form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Term {
    /// A literal known at evaluation time, e.g. `"dev"` or `2`.
    Ground(String),
    /// A reference into unknown data, e.g. `data.posts[_].department`.
    Reference(String),
    /// Anything else the engine left behind (nested calls, composites).
    Other(String),
}

impl Term {
    pub fn ground(literal: impl Into<String>) -> Self {
        Term::Ground(literal.into())
    }

    /// A ground string literal, quoted the way the engine prints it.
    pub fn string(value: &str) -> Self {
        Term::Ground(serde_json::Value::from(value).to_string())
    }

    pub fn reference(path: impl Into<String>) -> Self {
        Term::Reference(path.into())
    }

    pub fn text(&self) -> &str {
        match self {
            Term::Ground(s) | Term::Reference(s) | Term::Other(s) => s,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}
