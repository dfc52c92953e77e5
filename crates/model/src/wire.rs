//! Decoding of the policy engine's compile API response.
//!
//! The engine returns residual queries as JSON ASTs:
//!
//! ```json
//! {"result": {"queries": [[{"index": 0, "terms": [
//!     {"type": "ref", "value": [{"type": "var", "value": "eq"}]},
//!     {"type": "ref", "value": [{"type": "var", "value": "data"},
//!                               {"type": "string", "value": "posts"},
//!                               {"type": "var", "value": "$01"},
//!                               {"type": "string", "value": "department"}]},
//!     {"type": "string", "value": "dev"}]}]]}}
//! ```
//!
//! Operands are turned back into the engine's text form so the translator
//! sees the same representation whichever way the residuals arrived.

use crate::residual::{ResidualClause, ResidualExpression, ResidualSet, Term};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("Invalid compile response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expression {index} in query {query} is negated")]
    NegatedExpression { query: usize, index: usize },

    #[error("Expression {index} in query {query} has no terms")]
    EmptyCall { query: usize, index: usize },

    #[error("Invalid operator term: {0}")]
    InvalidOperator(String),

    #[error("Invalid reference segment: {0}")]
    InvalidRef(String),
}

#[derive(Debug, Deserialize)]
struct CompileResponse {
    #[serde(default)]
    result: Option<CompileResult>,
}

#[derive(Debug, Deserialize)]
struct CompileResult {
    #[serde(default)]
    queries: Option<Vec<Vec<WireExpr>>>,
}

#[derive(Debug, Deserialize)]
struct WireExpr {
    #[serde(default)]
    negated: bool,
    terms: WireTerms,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireTerms {
    Call(Vec<WireTerm>),
    Single(WireTerm),
}

#[derive(Debug, Deserialize)]
struct WireTerm {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    value: serde_json::Value,
}

/// Decodes a compile API response body into a residual set.
///
/// A response without `result` or `queries` means no branch can hold and
/// decodes to an empty set.
pub fn decode_compile_response(body: &str) -> Result<ResidualSet, WireError> {
    let response: CompileResponse = serde_json::from_str(body)?;
    decode(response)
}

pub fn decode_compile_value(value: serde_json::Value) -> Result<ResidualSet, WireError> {
    let response: CompileResponse = serde_json::from_value(value)?;
    decode(response)
}

fn decode(response: CompileResponse) -> Result<ResidualSet, WireError> {
    let Some(queries) = response.result.and_then(|r| r.queries) else {
        return Ok(ResidualSet::default());
    };

    let mut clauses = Vec::with_capacity(queries.len());
    for (query, exprs) in queries.into_iter().enumerate() {
        let mut expressions = Vec::with_capacity(exprs.len());
        for (index, expr) in exprs.into_iter().enumerate() {
            if expr.negated {
                return Err(WireError::NegatedExpression { query, index });
            }
            expressions.push(decode_expr(expr.terms, query, index)?);
        }
        clauses.push(ResidualClause::new(expressions));
    }

    Ok(ResidualSet::new(clauses))
}

fn decode_expr(
    terms: WireTerms,
    query: usize,
    index: usize,
) -> Result<ResidualExpression, WireError> {
    match terms {
        WireTerms::Call(terms) => {
            let mut iter = terms.into_iter();
            let operator = iter
                .next()
                .ok_or(WireError::EmptyCall { query, index })
                .and_then(|op| operator_name(&op))?;
            let operands = iter.map(decode_term).collect::<Result<Vec<_>, _>>()?;
            Ok(ResidualExpression::new(operator, operands))
        }
        // A bare term, e.g. `data.posts[_].public`, has no comparison to map.
        WireTerms::Single(term) => {
            let text = decode_term(term)?.text().to_string();
            Ok(ResidualExpression::new(text, Vec::new()))
        }
    }
}

fn operator_name(term: &WireTerm) -> Result<String, WireError> {
    if term.kind != "ref" {
        return Err(WireError::InvalidOperator(term.value.to_string()));
    }

    let segments = term
        .value
        .as_array()
        .ok_or_else(|| WireError::InvalidOperator(term.value.to_string()))?;

    segments
        .iter()
        .map(|seg| {
            seg.get("value")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| WireError::InvalidOperator(seg.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(|parts| parts.join("."))
}

fn decode_term(term: WireTerm) -> Result<Term, WireError> {
    match term.kind.as_str() {
        "string" | "number" | "boolean" | "null" => Ok(Term::Ground(term.value.to_string())),
        "ref" => render_ref(&term.value).map(Term::Reference),
        "var" => Ok(Term::Other(
            term.value.as_str().unwrap_or_default().to_string(),
        )),
        _ => Ok(Term::Other(term.value.to_string())),
    }
}

/// Renders a reference in the engine's text syntax: `data.posts[_].author`.
fn render_ref(value: &serde_json::Value) -> Result<String, WireError> {
    let segments = value
        .as_array()
        .ok_or_else(|| WireError::InvalidRef(value.to_string()))?;

    let mut out = String::new();
    for (i, seg) in segments.iter().enumerate() {
        let kind = seg.get("type").and_then(serde_json::Value::as_str);
        let inner = seg.get("value").unwrap_or(&serde_json::Value::Null);

        match (kind, inner) {
            (Some("var"), serde_json::Value::String(name)) if i == 0 => out.push_str(name),
            (Some("var"), serde_json::Value::String(name)) if name.starts_with('$') => {
                out.push_str("[_]")
            }
            (Some("var"), serde_json::Value::String(name)) => {
                out.push('[');
                out.push_str(name);
                out.push(']');
            }
            (Some("string"), serde_json::Value::String(s)) if i > 0 && is_identifier(s) => {
                out.push('.');
                out.push_str(s);
            }
            (Some("string"), serde_json::Value::String(_)) if i > 0 => {
                out.push('[');
                out.push_str(&inner.to_string());
                out.push(']');
            }
            (Some("number"), serde_json::Value::Number(n)) if i > 0 => {
                out.push('[');
                out.push_str(&n.to_string());
                out.push(']');
            }
            _ => return Err(WireError::InvalidRef(seg.to_string())),
        }
    }

    Ok(out)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
