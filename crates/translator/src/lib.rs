//! Compiles the residual clauses of a partially evaluated access policy into
//! a [`FilterTree`](model::FilterTree).
//!
//! Clauses are OR'ed, expressions inside a clause are AND'ed. A residual set
//! with no clauses denies access, one with an empty clause allows it.

pub mod combinator;
pub mod config;
pub mod error;
pub mod operator;
pub mod outcome;
pub mod path;
pub mod predicate;
pub mod term;
mod translator;

pub use combinator::MalformedPolicy;
pub use config::TranslatorConfig;
pub use error::{CombineError, OperatorError, PathError, TermError, TranslationError};
pub use operator::{Operator, map_operator};
pub use outcome::{ClauseCompiler, Outcome};
pub use term::{ResolvedTerm, TermResolver};
pub use translator::Translator;
