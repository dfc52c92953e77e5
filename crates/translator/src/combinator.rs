use crate::error::{CombineError, TermError, TranslationError};
use model::{FilterTree, ResidualExpression};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Folds the predicates of one residual clause into a single node.
///
/// A sole predicate is returned unwrapped; several are joined by `And` in
/// expression order.
pub fn combine(mut predicates: Vec<FilterTree>) -> Result<FilterTree, CombineError> {
    match predicates.len() {
        0 => Err(CombineError::Empty),
        1 => Ok(predicates.remove(0)),
        _ => Ok(FilterTree::and(predicates)),
    }
}

/// What happens to a residual expression that is not a `field <op> value`
/// comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedPolicy {
    /// Drop the expression and keep translating its clause. The resulting
    /// filter may be weaker than the policy if a dropped expression mattered.
    #[default]
    Skip,
    /// Abort the whole translation.
    Reject,
}

impl MalformedPolicy {
    pub fn handle(&self, expr: &ResidualExpression, err: TermError) -> Result<(), TranslationError> {
        match self {
            MalformedPolicy::Skip => {
                warn!("Skipping residual expression {expr}: {err}");
                Ok(())
            }
            MalformedPolicy::Reject => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{PredicateKind, Term};

    fn eq(field: &str, value: &str) -> FilterTree {
        FilterTree::predicate(field, PredicateKind::Equal, value)
    }

    #[test]
    fn test_combine_empty() {
        assert_eq!(combine(vec![]), Err(CombineError::Empty));
    }

    #[test]
    fn test_combine_single_is_unwrapped() {
        assert_eq!(combine(vec![eq("author", "bob")]), Ok(eq("author", "bob")));
    }

    #[test]
    fn test_combine_preserves_order() {
        let combined = combine(vec![eq("a", "1"), eq("b", "2"), eq("c", "3")]).unwrap();
        assert_eq!(
            combined,
            FilterTree::and(vec![eq("a", "1"), eq("b", "2"), eq("c", "3")])
        );
    }

    #[test]
    fn test_policies() {
        let expr = ResidualExpression::new("eq", vec![Term::string("x")]);
        let err = TermError::UnsupportedArity {
            operator: "eq".into(),
            arity: 1,
        };

        assert_eq!(MalformedPolicy::Skip.handle(&expr, err.clone()), Ok(()));
        assert_eq!(
            MalformedPolicy::Reject.handle(&expr, err.clone()),
            Err(TranslationError::Malformed(err))
        );
    }
}
