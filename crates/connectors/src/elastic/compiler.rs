use super::query::ElasticQuery;
use crate::compiler::FilterCompiler;
use model::{FilterTree, Predicate, PredicateKind, Value};

pub struct ElasticFilterCompiler;

impl FilterCompiler for ElasticFilterCompiler {
    type Filter = ElasticQuery;

    fn compile(tree: &FilterTree) -> Self::Filter {
        compile_elastic_query(tree)
    }
}

/// Recursively compiles a filter tree into a bool query.
fn compile_elastic_query(tree: &FilterTree) -> ElasticQuery {
    match tree {
        FilterTree::Predicate(predicate) => compile_predicate(predicate),
        FilterTree::And(children) => {
            ElasticQuery::filter_all(children.iter().map(compile_elastic_query).collect())
        }
        FilterTree::Or(children) => {
            ElasticQuery::should(children.iter().map(compile_elastic_query).collect())
        }
        FilterTree::Not(child) => ElasticQuery::must_not(vec![compile_elastic_query(child)]),
    }
}

fn compile_predicate(predicate: &Predicate) -> ElasticQuery {
    let Predicate { field, kind, value } = predicate;

    // The backend indexes no nulls; equality with null means the field is absent.
    if *value == Value::Null {
        match kind {
            PredicateKind::Equal => {
                return ElasticQuery::must_not(vec![ElasticQuery::exists(field)]);
            }
            PredicateKind::NotEqual => return ElasticQuery::exists(field),
            _ => {}
        }
    }

    match kind {
        PredicateKind::Equal => ElasticQuery::term(field, value),
        PredicateKind::NotEqual => ElasticQuery::must_not(vec![ElasticQuery::term(field, value)]),
        PredicateKind::Less => ElasticQuery::range(field, "lt", value),
        PredicateKind::LessOrEqual => ElasticQuery::range(field, "lte", value),
        PredicateKind::Greater => ElasticQuery::range(field, "gt", value),
        PredicateKind::GreaterOrEqual => ElasticQuery::range(field, "gte", value),
        PredicateKind::Contains => ElasticQuery::query_string(field, &value.as_plain_string()),
        PredicateKind::Regex => ElasticQuery::regexp(field, &value.as_plain_string()),
    }
}
