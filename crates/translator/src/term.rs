use crate::{
    config::TranslatorConfig,
    error::TermError,
    path::FieldPath,
};
use model::{FieldReference, ResidualExpression, Term, Value};

/// The `(value, field)` pair read from a well-formed residual expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTerm {
    pub value: Value,
    pub field: FieldReference,
    /// The literal was the left operand, as in `lt(2, data.posts[_].clearance)`.
    pub ground_first: bool,
}

/// Reads residual expressions as comparisons between a ground literal and a
/// field of the protected relation.
#[derive(Debug, Clone)]
pub struct TermResolver {
    root: String,
    relation: String,
}

impl TermResolver {
    pub fn new(root: impl Into<String>, relation: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            relation: relation.into(),
        }
    }

    pub fn from_config(config: &TranslatorConfig) -> Self {
        Self::new(config.root.clone(), config.relation.clone())
    }

    pub fn relation(&self) -> &str {
        &self.relation
    }

    pub fn check_arity(&self, expr: &ResidualExpression) -> Result<(), TermError> {
        if expr.arity() == 2 {
            Ok(())
        } else {
            Err(TermError::UnsupportedArity {
                operator: expr.operator.clone(),
                arity: expr.arity(),
            })
        }
    }

    pub fn resolve(&self, expr: &ResidualExpression) -> Result<ResolvedTerm, TermError> {
        self.check_arity(expr)?;

        let (literal, unresolved, ground_first) = match (&expr.operands[0], &expr.operands[1]) {
            (Term::Ground(_), Term::Ground(_)) => {
                return Err(malformed(expr, "both operands are ground"));
            }
            (Term::Ground(literal), other) => (literal, other, true),
            (other, Term::Ground(literal)) => (literal, other, false),
            _ => return Err(malformed(expr, "neither operand is ground")),
        };

        let Term::Reference(path) = unresolved else {
            return Err(malformed(
                expr,
                format!("'{unresolved}' is not a field reference"),
            ));
        };

        let field = FieldPath::parse(path)
            .and_then(|p| p.field_reference(&self.root, &self.relation))
            .map_err(|err| malformed(expr, err.to_string()))?;

        Ok(ResolvedTerm {
            value: Value::from_literal(literal),
            field,
            ground_first,
        })
    }
}

impl Default for TermResolver {
    fn default() -> Self {
        Self::from_config(&TranslatorConfig::default())
    }
}

fn malformed(expr: &ResidualExpression, reason: impl Into<String>) -> TermError {
    TermError::MalformedTerm {
        expression: expr.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(op: &str, operands: Vec<Term>) -> ResidualExpression {
        ResidualExpression::new(op, operands)
    }

    #[test]
    fn test_resolve_reference_then_ground() {
        let resolver = TermResolver::default();
        let resolved = resolver
            .resolve(&expr(
                "eq",
                vec![
                    Term::reference("data.posts[_].department"),
                    Term::string("dev"),
                ],
            ))
            .unwrap();

        assert_eq!(resolved.value, Value::String("dev".into()));
        assert_eq!(resolved.field, FieldReference::new("posts", "department"));
        assert!(!resolved.ground_first);
    }

    #[test]
    fn test_resolve_ground_then_reference() {
        let resolver = TermResolver::default();
        let resolved = resolver
            .resolve(&expr(
                "lte",
                vec![Term::ground("2"), Term::reference("data.posts[_].clearance")],
            ))
            .unwrap();

        assert_eq!(resolved.value, Value::Int(2));
        assert_eq!(resolved.field.field, "clearance");
        assert!(resolved.ground_first);
    }

    #[test]
    fn test_arity() {
        let resolver = TermResolver::default();
        let err = resolver
            .resolve(&expr("eq", vec![Term::reference("data.posts[_].id")]))
            .unwrap_err();
        assert_eq!(
            err,
            TermError::UnsupportedArity {
                operator: "eq".into(),
                arity: 1
            }
        );
    }

    #[test]
    fn test_grounding_rules() {
        let resolver = TermResolver::default();

        let both = expr("eq", vec![Term::string("a"), Term::string("b")]);
        assert!(matches!(
            resolver.resolve(&both),
            Err(TermError::MalformedTerm { reason, .. }) if reason.contains("both")
        ));

        let neither = expr(
            "eq",
            vec![
                Term::reference("data.posts[_].author"),
                Term::reference("data.posts[_].email"),
            ],
        );
        assert!(matches!(
            resolver.resolve(&neither),
            Err(TermError::MalformedTerm { reason, .. }) if reason.contains("neither")
        ));

        let call = expr("eq", vec![Term::Other("count(x)".into()), Term::ground("1")]);
        assert!(matches!(
            resolver.resolve(&call),
            Err(TermError::MalformedTerm { .. })
        ));
    }

    #[test]
    fn test_foreign_relation_is_malformed() {
        let resolver = TermResolver::new("data", "posts");
        let err = resolver
            .resolve(&expr(
                "eq",
                vec![Term::reference("data.users[_].name"), Term::string("bob")],
            ))
            .unwrap_err();
        assert!(matches!(err, TermError::MalformedTerm { .. }));
    }
}
