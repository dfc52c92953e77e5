use model::Value;
use serde::Serialize;
use serde_json::json;
use std::fmt;

/// A query in the search backend's JSON DSL.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ElasticQuery(serde_json::Value);

impl ElasticQuery {
    pub fn match_all() -> Self {
        Self(json!({"match_all": {}}))
    }

    pub fn term(field: &str, value: &Value) -> Self {
        Self(keyed("term", keyed(field, value.to_json())))
    }

    /// Documents with a non-null value for `field`.
    pub fn exists(field: &str) -> Self {
        Self(json!({"exists": {"field": field}}))
    }

    pub fn range(field: &str, bound: &str, value: &Value) -> Self {
        Self(keyed("range", keyed(field, keyed(bound, value.to_json()))))
    }

    pub fn query_string(field: &str, pattern: &str) -> Self {
        Self(json!({"query_string": {"query": pattern, "default_field": field}}))
    }

    pub fn regexp(field: &str, pattern: &str) -> Self {
        Self(keyed("regexp", keyed(field, json!(pattern))))
    }

    /// All queries must match, without scoring.
    pub fn filter_all(queries: Vec<ElasticQuery>) -> Self {
        Self::boolean("filter", queries)
    }

    /// At least one query must match.
    pub fn should(queries: Vec<ElasticQuery>) -> Self {
        Self::boolean("should", queries)
    }

    pub fn must_not(queries: Vec<ElasticQuery>) -> Self {
        Self::boolean("must_not", queries)
    }

    pub fn as_json(&self) -> &serde_json::Value {
        &self.0
    }

    pub fn into_json(self) -> serde_json::Value {
        self.0
    }

    fn boolean(occur: &str, queries: Vec<ElasticQuery>) -> Self {
        let clauses = queries.into_iter().map(ElasticQuery::into_json).collect();
        Self(keyed("bool", keyed(occur, serde_json::Value::Array(clauses))))
    }
}

impl fmt::Display for ElasticQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn keyed(key: &str, value: serde_json::Value) -> serde_json::Value {
    let mut map = serde_json::Map::new();
    map.insert(key.to_string(), value);
    serde_json::Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_queries() {
        assert_eq!(
            ElasticQuery::term("id", &Value::from("post1")).into_json(),
            json!({"term": {"id": "post1"}})
        );
        assert_eq!(
            ElasticQuery::range("clearance", "gte", &Value::Int(2)).into_json(),
            json!({"range": {"clearance": {"gte": 2}}})
        );
        assert_eq!(
            ElasticQuery::exists("email").into_json(),
            json!({"exists": {"field": "email"}})
        );
        assert_eq!(
            ElasticQuery::query_string("message", "*OPA*").into_json(),
            json!({"query_string": {"query": "*OPA*", "default_field": "message"}})
        );
        assert_eq!(
            ElasticQuery::regexp("email", ".*@opa.com").into_json(),
            json!({"regexp": {"email": ".*@opa.com"}})
        );
    }

    #[test]
    fn test_bool_queries() {
        let query = ElasticQuery::filter_all(vec![
            ElasticQuery::match_all(),
            ElasticQuery::must_not(vec![ElasticQuery::term("author", &Value::from("ben"))]),
        ]);

        assert_eq!(
            query.into_json(),
            json!({"bool": {"filter": [
                {"match_all": {}},
                {"bool": {"must_not": [{"term": {"author": "ben"}}]}}
            ]}})
        );
    }
}
