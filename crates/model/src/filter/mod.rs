//! Backend-agnostic boolean filter trees.

use crate::core::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    /// Substring match, value carries the `*value*` pattern.
    Contains,
    Regex,
}

impl fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredicateKind::Equal => write!(f, "=="),
            PredicateKind::NotEqual => write!(f, "!="),
            PredicateKind::Less => write!(f, "<"),
            PredicateKind::LessOrEqual => write!(f, "<="),
            PredicateKind::Greater => write!(f, ">"),
            PredicateKind::GreaterOrEqual => write!(f, ">="),
            PredicateKind::Contains => write!(f, "contains"),
            PredicateKind::Regex => write!(f, "matches"),
        }
    }
}

/// A single field comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub field: String,
    pub kind: PredicateKind,
    pub value: Value,
}

impl Predicate {
    pub fn new(field: impl Into<String>, kind: PredicateKind, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            kind,
            value: value.into(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.kind, self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterTree {
    Predicate(Predicate),
    And(Vec<FilterTree>),
    Or(Vec<FilterTree>),
    Not(Box<FilterTree>),
}

impl FilterTree {
    pub fn predicate(field: impl Into<String>, kind: PredicateKind, value: impl Into<Value>) -> Self {
        FilterTree::Predicate(Predicate::new(field, kind, value))
    }

    pub fn and(children: Vec<FilterTree>) -> Self {
        FilterTree::And(children)
    }

    pub fn or(children: Vec<FilterTree>) -> Self {
        FilterTree::Or(children)
    }

    pub fn not(child: FilterTree) -> Self {
        FilterTree::Not(Box::new(child))
    }
}

impl fmt::Display for FilterTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |children: &[FilterTree], sep: &str| {
            children
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(sep)
        };

        match self {
            FilterTree::Predicate(p) => write!(f, "{p}"),
            FilterTree::And(children) => write!(f, "({})", join(children, " AND ")),
            FilterTree::Or(children) => write!(f, "({})", join(children, " OR ")),
            FilterTree::Not(child) => write!(f, "NOT {child}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_display() {
        let tree = FilterTree::or(vec![
            FilterTree::predicate("department", PredicateKind::Equal, "dev"),
            FilterTree::and(vec![
                FilterTree::predicate("clearance", PredicateKind::GreaterOrEqual, 2i64),
                FilterTree::not(FilterTree::predicate("author", PredicateKind::Equal, "bob")),
            ]),
        ]);

        assert_eq!(
            tree.to_string(),
            r#"(department == "dev" OR (clearance >= 2 AND NOT author == "bob"))"#
        );
    }
}
