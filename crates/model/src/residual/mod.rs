//! Residual output of partial evaluation.
//!
//! A [`ResidualSet`] is a disjunction of [`ResidualClause`]s, each clause a
//! conjunction of [`ResidualExpression`]s.

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod field;
pub mod term;

pub use field::FieldReference;
pub use term::Term;

/// A binary comparison the policy engine could not decide on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidualExpression {
    pub operator: String,
    pub operands: Vec<Term>,
}

impl ResidualExpression {
    pub fn new(operator: impl Into<String>, operands: Vec<Term>) -> Self {
        Self {
            operator: operator.into(),
            operands,
        }
    }

    pub fn arity(&self) -> usize {
        self.operands.len()
    }
}

impl fmt::Display for ResidualExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operands = self
            .operands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}({operands})", self.operator)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResidualClause {
    pub expressions: Vec<ResidualExpression>,
}

impl ResidualClause {
    pub fn new(expressions: Vec<ResidualExpression>) -> Self {
        Self { expressions }
    }

    /// An empty clause is a branch that holds with no further condition.
    pub fn is_empty(&self) -> bool {
        self.expressions.is_empty()
    }
}

impl fmt::Display for ResidualClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exprs = self
            .expressions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "[{exprs}]")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResidualSet {
    pub clauses: Vec<ResidualClause>,
}

impl ResidualSet {
    pub fn new(clauses: Vec<ResidualClause>) -> Self {
        Self { clauses }
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }
}
