use serde::{Deserialize, Serialize};
use std::fmt;

/// A ground literal taken from a residual expression.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Int(i64),
    Float(f64),
    String(String),
    Null,
}

impl Value {
    /// Parses a literal as serialized by the policy engine (`"dev"`, `2`,
    /// `2.5`, `true`, `null`).
    ///
    /// Text that is not a valid scalar literal is kept as a string with any
    /// surrounding double quotes trimmed.
    pub fn from_literal(literal: &str) -> Self {
        match serde_json::from_str::<serde_json::Value>(literal.trim()) {
            Ok(json) => Self::from_json(&json).unwrap_or_else(|| Self::trimmed(literal)),
            Err(_) => Self::trimmed(literal),
        }
    }

    /// Converts a JSON scalar. Arrays and objects have no ground scalar form.
    pub fn from_json(json: &serde_json::Value) -> Option<Self> {
        match json {
            serde_json::Value::Null => Some(Value::Null),
            serde_json::Value::Bool(b) => Some(Value::Boolean(*b)),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Value::Int(i)),
                None => n.as_f64().map(Value::Float),
            },
            serde_json::Value::String(s) => Some(Value::String(s.clone())),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Null => serde_json::Value::Null,
        }
    }

    /// Renders the value without quoting, as used in patterns.
    pub fn as_plain_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Null => "null".to_string(),
            other => other.to_string(),
        }
    }

    fn trimmed(literal: &str) -> Self {
        Value::String(literal.trim().trim_matches('"').to_string())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "\"{}\"", v.replace('"', "\\\"")),
            Value::Null => write!(f, "null"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_literal_strips_quoting() {
        assert_eq!(Value::from_literal("\"dev\""), Value::String("dev".into()));
        assert_eq!(
            Value::from_literal(r#""say \"hi\"""#),
            Value::String("say \"hi\"".into())
        );
    }

    #[test]
    fn test_from_literal_scalars() {
        assert_eq!(Value::from_literal("2"), Value::Int(2));
        assert_eq!(Value::from_literal("2.5"), Value::Float(2.5));
        assert_eq!(Value::from_literal("true"), Value::Boolean(true));
        assert_eq!(Value::from_literal("null"), Value::Null);
    }

    #[test]
    fn test_from_literal_fallback() {
        assert_eq!(Value::from_literal("dev"), Value::String("dev".into()));
        assert_eq!(Value::from_literal("[1, 2]"), Value::String("[1, 2]".into()));
    }

    #[test]
    fn test_to_json_is_plain_scalar() {
        assert_eq!(Value::Int(3).to_json(), serde_json::json!(3));
        assert_eq!(Value::from("hr").to_json(), serde_json::json!("hr"));
    }
}
