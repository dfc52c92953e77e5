use thiserror::Error;

/// Failures of the reference path parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("Reference path is empty")]
    Empty,

    #[error("Unexpected character '{ch}' at offset {offset} in '{path}'")]
    UnexpectedChar {
        path: String,
        ch: char,
        offset: usize,
    },

    #[error("Unterminated index in '{0}'")]
    UnterminatedIndex(String),

    #[error("Unterminated string in '{0}'")]
    UnterminatedString(String),

    #[error("Reference '{path}' is not rooted at '{expected}'")]
    WrongRoot { path: String, expected: String },

    #[error("Reference '{0}' names no relation")]
    MissingRelation(String),

    #[error("Reference '{path}' does not address the protected relation '{expected}'")]
    WrongRelation { path: String, expected: String },

    #[error("Reference '{0}' names no field")]
    MissingField(String),

    #[error("Reference '{0}' indexes into a field with a non-wildcard key")]
    NestedIndex(String),
}

/// A residual expression that cannot be read as `field <op> value`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TermError {
    #[error("Operator '{operator}' has {arity} operands, expected 2")]
    UnsupportedArity { operator: String, arity: usize },

    #[error("Malformed term in '{expression}': {reason}")]
    MalformedTerm { expression: String, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperatorError {
    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombineError {
    #[error("Cannot combine an empty list of predicates")]
    Empty,
}

/// Fatal translation failures. No filter is produced when one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error(transparent)]
    Operator(#[from] OperatorError),

    #[error("Malformed residual expression: {0}")]
    Malformed(#[from] TermError),

    #[error("Residual clause #{clause} has no filterable expressions")]
    NoFilterableExpressions { clause: usize },
}

impl TranslationError {
    pub fn is_unsupported_operator(&self) -> bool {
        matches!(self, TranslationError::Operator(_))
    }
}

pub type Result<T> = std::result::Result<T, TranslationError>;
