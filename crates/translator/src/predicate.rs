use crate::operator::{Coercion, coercion};
use model::{FieldReference, FilterTree, PredicateKind, Value};

/// Builds the filter node for one resolved expression.
///
/// `NotEqual` becomes `Not(Equal)` so the tree only needs one negation form.
pub fn build(field: FieldReference, value: Value, kind: PredicateKind) -> FilterTree {
    let value = match coercion(kind) {
        Coercion::None => value,
        Coercion::Wildcard => Value::String(format!("*{}*", value.as_plain_string())),
        Coercion::Pattern => Value::String(value.as_plain_string()),
    };

    match kind {
        PredicateKind::NotEqual => {
            FilterTree::not(FilterTree::predicate(field.field, PredicateKind::Equal, value))
        }
        _ => FilterTree::predicate(field.field, kind, value),
    }
}
