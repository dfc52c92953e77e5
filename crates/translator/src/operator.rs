use crate::error::OperatorError;
use model::PredicateKind;
use std::{fmt, str::FromStr};

/// Comparison operators the filtering layer can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    Equal,
    Neq,
    Lt,
    Lte,
    Gt,
    Gte,
    Contains,
    ReMatch,
}

/// Value rewriting a predicate kind needs before it reaches the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    None,
    /// Wrap the value as a `*value*` substring pattern.
    Wildcard,
    /// Use the value's plain text as a regular expression.
    Pattern,
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Operator::Eq,
        Operator::Equal,
        Operator::Neq,
        Operator::Lt,
        Operator::Lte,
        Operator::Gt,
        Operator::Gte,
        Operator::Contains,
        Operator::ReMatch,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Equal => "equal",
            Operator::Neq => "neq",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Contains => "contains",
            Operator::ReMatch => "re_match",
        }
    }

    pub fn predicate_kind(&self) -> PredicateKind {
        match self {
            Operator::Eq | Operator::Equal => PredicateKind::Equal,
            Operator::Neq => PredicateKind::NotEqual,
            Operator::Lt => PredicateKind::Less,
            Operator::Lte => PredicateKind::LessOrEqual,
            Operator::Gt => PredicateKind::Greater,
            Operator::Gte => PredicateKind::GreaterOrEqual,
            Operator::Contains => PredicateKind::Contains,
            Operator::ReMatch => PredicateKind::Regex,
        }
    }
}

impl FromStr for Operator {
    type Err = OperatorError;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == symbol)
            .ok_or_else(|| OperatorError::UnsupportedOperator(symbol.to_string()))
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Maps an operator symbol to the predicate kind it builds. Exact and
/// case-sensitive.
pub fn map_operator(symbol: &str) -> Result<PredicateKind, OperatorError> {
    symbol.parse::<Operator>().map(|op| op.predicate_kind())
}

pub fn coercion(kind: PredicateKind) -> Coercion {
    match kind {
        PredicateKind::Equal
        | PredicateKind::NotEqual
        | PredicateKind::Less
        | PredicateKind::LessOrEqual
        | PredicateKind::Greater
        | PredicateKind::GreaterOrEqual => Coercion::None,
        PredicateKind::Contains => Coercion::Wildcard,
        PredicateKind::Regex => Coercion::Pattern,
    }
}

/// The kind that holds with the operands swapped: `2 < x` is `x > 2`.
pub fn mirror(kind: PredicateKind) -> PredicateKind {
    match kind {
        PredicateKind::Less => PredicateKind::Greater,
        PredicateKind::LessOrEqual => PredicateKind::GreaterOrEqual,
        PredicateKind::Greater => PredicateKind::Less,
        PredicateKind::GreaterOrEqual => PredicateKind::LessOrEqual,
        PredicateKind::Equal
        | PredicateKind::NotEqual
        | PredicateKind::Contains
        | PredicateKind::Regex => kind,
    }
}
