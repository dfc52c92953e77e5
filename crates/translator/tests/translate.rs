//! End-to-end translation of residual sets.

use model::{
    Decision, FilterTree, PredicateKind, ResidualClause, ResidualExpression, ResidualSet, Term,
    Value, wire::decode_compile_value,
};
use serde_json::json;
use translator::{OperatorError, TermError, TranslationError, Translator, TranslatorConfig};

fn field(name: &str) -> Term {
    Term::reference(format!("data.posts[_].{name}"))
}

fn cmp(op: &str, name: &str, value: Term) -> ResidualExpression {
    ResidualExpression::new(op, vec![field(name), value])
}

fn clause(exprs: Vec<ResidualExpression>) -> ResidualClause {
    ResidualClause::new(exprs)
}

fn eq(name: &str, value: &str) -> FilterTree {
    FilterTree::predicate(name, PredicateKind::Equal, value)
}

#[test]
fn test_empty_set_is_denied() {
    let decision = Translator::default().translate(&ResidualSet::default());
    assert_eq!(decision, Ok(Decision::Denied));
}

#[test]
fn test_empty_clause_is_allowed() {
    let set = ResidualSet::new(vec![
        clause(vec![cmp("eq", "department", Term::string("dev"))]),
        clause(vec![]),
        // Would fail translation if it were ever looked at.
        clause(vec![cmp("startswith", "author", Term::string("b"))]),
    ]);

    assert_eq!(Translator::default().translate(&set), Ok(Decision::Allowed));
}

#[test]
fn test_single_equality() {
    let set = ResidualSet::new(vec![clause(vec![cmp(
        "eq",
        "department",
        Term::string("dev"),
    )])]);

    assert_eq!(
        Translator::default().translate(&set),
        Ok(Decision::Conditional(eq("department", "dev")))
    );
}

#[test]
fn test_clauses_are_ored() {
    let set = ResidualSet::new(vec![
        clause(vec![cmp("eq", "department", Term::string("dev"))]),
        clause(vec![cmp("eq", "department", Term::string("hr"))]),
    ]);

    assert_eq!(
        Translator::default().translate(&set),
        Ok(Decision::Conditional(FilterTree::or(vec![
            eq("department", "dev"),
            eq("department", "hr"),
        ])))
    );
}

#[test]
fn test_expressions_are_anded() {
    let set = ResidualSet::new(vec![clause(vec![
        cmp("eq", "department", Term::string("dev")),
        cmp("gte", "clearance", Term::ground("2")),
    ])]);

    assert_eq!(
        Translator::default().translate(&set),
        Ok(Decision::Conditional(FilterTree::and(vec![
            eq("department", "dev"),
            FilterTree::predicate("clearance", PredicateKind::GreaterOrEqual, 2i64),
        ])))
    );
}

#[test]
fn test_neq_is_negated_equality() {
    let set = ResidualSet::new(vec![clause(vec![cmp(
        "neq",
        "department",
        Term::string("hr"),
    )])]);

    assert_eq!(
        Translator::default().translate(&set),
        Ok(Decision::Conditional(FilterTree::not(eq("department", "hr"))))
    );
}

#[test]
fn test_unsupported_operator_aborts() {
    let set = ResidualSet::new(vec![
        clause(vec![cmp("eq", "department", Term::string("dev"))]),
        clause(vec![cmp("startswith", "author", Term::string("b"))]),
    ]);

    assert_eq!(
        Translator::default().translate(&set),
        Err(TranslationError::Operator(
            OperatorError::UnsupportedOperator("startswith".into())
        ))
    );
}

#[test]
fn test_translation_is_idempotent() {
    let set = ResidualSet::new(vec![
        clause(vec![
            cmp("eq", "department", Term::string("dev")),
            cmp("lt", "clearance", Term::ground("5")),
        ]),
        clause(vec![cmp("contains", "message", Term::string("OPA"))]),
        clause(vec![cmp("neq", "author", Term::string("ben"))]),
    ]);

    let translator = Translator::default();
    let first = translator.translate(&set).unwrap();
    let second = translator.translate(&set).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_three_operands_skipped() {
    let set = ResidualSet::new(vec![clause(vec![
        ResidualExpression::new(
            "eq",
            vec![field("author"), Term::string("bob"), Term::string("alice")],
        ),
        cmp("eq", "department", Term::string("dev")),
        cmp("lte", "clearance", Term::ground("3")),
    ])]);

    assert_eq!(
        Translator::default().translate(&set),
        Ok(Decision::Conditional(FilterTree::and(vec![
            eq("department", "dev"),
            FilterTree::predicate("clearance", PredicateKind::LessOrEqual, 3i64),
        ])))
    );
}

#[test]
fn test_strict_policy_rejects_malformed() {
    let set = ResidualSet::new(vec![clause(vec![
        ResidualExpression::new(
            "eq",
            vec![field("author"), Term::string("bob"), Term::string("alice")],
        ),
        cmp("eq", "department", Term::string("dev")),
    ])]);

    let strict = Translator::new(TranslatorConfig::default().strict());
    assert_eq!(
        strict.translate(&set),
        Err(TranslationError::Malformed(TermError::UnsupportedArity {
            operator: "eq".into(),
            arity: 3
        }))
    );
}

#[test]
fn test_other_relation_skipped() {
    let set = ResidualSet::new(vec![clause(vec![
        ResidualExpression::new(
            "eq",
            vec![Term::reference("data.users[_].name"), Term::string("bob")],
        ),
        cmp("eq", "author", Term::string("bob")),
    ])]);

    assert_eq!(
        Translator::default().translate(&set),
        Ok(Decision::Conditional(eq("author", "bob")))
    );
}

#[test]
fn test_configured_relation() {
    let set = ResidualSet::new(vec![clause(vec![ResidualExpression::new(
        "equal",
        vec![Term::string("ops"), Term::reference("data.articles[_].team")],
    )])]);

    let translator = Translator::new(TranslatorConfig::for_relation("articles"));
    assert_eq!(
        translator.translate(&set),
        Ok(Decision::Conditional(eq("team", "ops")))
    );
}

fn reversed(op: &str, value: Term, name: &str) -> ResidualExpression {
    ResidualExpression::new(op, vec![value, field(name)])
}

#[test]
fn test_literal_on_left_mirrors_ranges() {
    let cases = [
        ("lt", PredicateKind::Greater),
        ("lte", PredicateKind::GreaterOrEqual),
        ("gt", PredicateKind::Less),
        ("gte", PredicateKind::LessOrEqual),
    ];

    for (op, kind) in cases {
        let set = ResidualSet::new(vec![clause(vec![reversed(
            op,
            Term::ground("2"),
            "clearance",
        )])]);

        assert_eq!(
            Translator::default().translate(&set),
            Ok(Decision::Conditional(FilterTree::predicate(
                "clearance",
                kind,
                2i64
            ))),
            "operator {op}"
        );
    }
}

#[test]
fn test_literal_on_left_keeps_equality() {
    let set = ResidualSet::new(vec![clause(vec![
        reversed("eq", Term::string("dev"), "department"),
        reversed("neq", Term::string("ben"), "author"),
    ])]);

    assert_eq!(
        Translator::default().translate(&set),
        Ok(Decision::Conditional(FilterTree::and(vec![
            eq("department", "dev"),
            FilterTree::not(eq("author", "ben")),
        ])))
    );
}

#[test]
fn test_inexpressible_operand_order_skipped() {
    let set = ResidualSet::new(vec![clause(vec![
        reversed("contains", Term::string("OPA rocks"), "message"),
        cmp("re_match", "email", Term::string(".*@opa\\.com")),
        cmp("eq", "department", Term::string("dev")),
    ])]);

    assert_eq!(
        Translator::default().translate(&set),
        Ok(Decision::Conditional(eq("department", "dev")))
    );
}

#[test]
fn test_inexpressible_operand_order_rejected_when_strict() {
    let set = ResidualSet::new(vec![clause(vec![reversed(
        "contains",
        Term::string("OPA rocks"),
        "message",
    )])]);

    let strict = Translator::new(TranslatorConfig::default().strict());
    assert!(matches!(
        strict.translate(&set),
        Err(TranslationError::Malformed(TermError::MalformedTerm { reason, .. }))
            if reason.contains("contains")
    ));
}

#[test]
fn test_null_literals() {
    let set = ResidualSet::new(vec![clause(vec![
        cmp("eq", "email", Term::ground("null")),
        cmp("gt", "clearance", Term::ground("null")),
    ])]);

    assert_eq!(
        Translator::default().translate(&set),
        Ok(Decision::Conditional(FilterTree::predicate(
            "email",
            PredicateKind::Equal,
            Value::Null
        )))
    );
}

#[test]
fn test_compile_response_end_to_end() {
    let department = json!({"type": "ref", "value": [
        {"type": "var", "value": "data"},
        {"type": "string", "value": "posts"},
        {"type": "var", "value": "$02"},
        {"type": "string", "value": "department"}
    ]});
    let author = json!({"type": "ref", "value": [
        {"type": "var", "value": "data"},
        {"type": "string", "value": "posts"},
        {"type": "var", "value": "$01"},
        {"type": "string", "value": "author"}
    ]});
    let op = |name: &str| json!({"type": "ref", "value": [{"type": "var", "value": name}]});

    let response = json!({"result": {"queries": [
        [{"index": 0, "terms": [op("eq"), author, {"type": "string", "value": "bob"}]}],
        [
            {"index": 0, "terms": [op("eq"), department, {"type": "string", "value": "it"}]},
            {"index": 1, "terms": [op("re_match"), {"type": "string", "value": "^j.*"},
                {"type": "ref", "value": [
                    {"type": "var", "value": "data"},
                    {"type": "string", "value": "posts"},
                    {"type": "var", "value": "$02"},
                    {"type": "string", "value": "author"}
                ]}]}
        ]
    ]}});

    let set = decode_compile_value(response).unwrap();
    assert_eq!(
        Translator::default().translate(&set),
        Ok(Decision::Conditional(FilterTree::or(vec![
            eq("author", "bob"),
            FilterTree::and(vec![
                eq("department", "it"),
                FilterTree::predicate("author", PredicateKind::Regex, "^j.*"),
            ]),
        ])))
    );
}
