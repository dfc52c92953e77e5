pub mod core {
    pub mod value;
}
pub mod decision;
pub mod filter;
pub mod residual;
pub mod wire;

pub use crate::core::value::Value;
pub use decision::Decision;
pub use filter::{FilterTree, Predicate, PredicateKind};
pub use residual::{FieldReference, ResidualClause, ResidualExpression, ResidualSet, Term};
