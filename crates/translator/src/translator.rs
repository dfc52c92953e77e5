use crate::{
    combinator::{self, MalformedPolicy},
    config::TranslatorConfig,
    error::{Result, TermError, TranslationError},
    operator, outcome,
    outcome::ClauseCompiler,
    predicate,
    term::{ResolvedTerm, TermResolver},
};
use model::{
    Decision, FilterTree, PredicateKind, ResidualClause, ResidualExpression, ResidualSet, Value,
};
use tracing::debug;

/// Turns the residual output of partial evaluation into an access decision.
///
/// Pure and stateless between calls; one instance can serve concurrent
/// requests.
#[derive(Debug, Clone)]
pub struct Translator {
    terms: TermResolver,
    malformed: MalformedPolicy,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self {
            terms: TermResolver::from_config(&config),
            malformed: config.malformed,
        }
    }

    /// Translates a residual set.
    ///
    /// The first fatal error aborts the translation; no partial filter is
    /// ever returned.
    pub fn translate(&self, set: &ResidualSet) -> Result<Decision> {
        let decision = outcome::resolve(set, self)?;
        debug!(
            "Translated {} residual clause(s) over '{}' into {}",
            set.len(),
            self.terms.relation(),
            decision
        );
        Ok(decision)
    }

    /// Arity is checked before the operator: non-binary artifacts are skipped
    /// whatever their name.
    fn compile_expression(&self, expr: &ResidualExpression) -> Result<Option<FilterTree>> {
        if let Err(err) = self.terms.check_arity(expr) {
            self.malformed.handle(expr, err)?;
            return Ok(None);
        }

        let kind = operator::map_operator(&expr.operator)?;

        let resolved = self.terms.resolve(expr).and_then(|resolved| {
            let kind = orient(expr, kind, &resolved)?;
            Ok((resolved, kind))
        });

        match resolved {
            Ok((resolved, kind)) => Ok(Some(predicate::build(resolved.field, resolved.value, kind))),
            Err(err) => {
                self.malformed.handle(expr, err)?;
                Ok(None)
            }
        }
    }
}

/// Reads a resolved expression as `field <kind> value`.
///
/// A literal on the left mirrors range comparisons. `contains` needs the field
/// as the haystack and `re_match` the literal as the pattern; `null` only
/// compares for equality.
fn orient(
    expr: &ResidualExpression,
    kind: PredicateKind,
    resolved: &ResolvedTerm,
) -> std::result::Result<PredicateKind, TermError> {
    let reason = match (kind, resolved.ground_first) {
        _ if resolved.value == Value::Null
            && !matches!(kind, PredicateKind::Equal | PredicateKind::NotEqual) =>
        {
            "null can only be compared for equality"
        }
        (PredicateKind::Contains, true) => "contains expects the field before the substring",
        (PredicateKind::Regex, false) => "re_match expects the pattern before the field",
        (kind, true) => return Ok(operator::mirror(kind)),
        (kind, false) => return Ok(kind),
    };

    Err(TermError::MalformedTerm {
        expression: expr.to_string(),
        reason: reason.to_string(),
    })
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(TranslatorConfig::default())
    }
}

impl ClauseCompiler for Translator {
    fn compile_clause(&self, index: usize, clause: &ResidualClause) -> Result<FilterTree> {
        let mut predicates = Vec::with_capacity(clause.expressions.len());
        for expr in &clause.expressions {
            if let Some(predicate) = self.compile_expression(expr)? {
                predicates.push(predicate);
            }
        }

        combinator::combine(predicates)
            .map_err(|_| TranslationError::NoFilterableExpressions { clause: index })
    }
}
