use crate::error::Result;
use model::{Decision, FilterTree, ResidualClause, ResidualSet};
use tracing::debug;

/// Three-way reading of a residual set before any tree is built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome<'a> {
    Denied,
    Allowed,
    Conditional(&'a [ResidualClause]),
}

/// Compiles one non-empty residual clause into a filter tree.
pub trait ClauseCompiler {
    fn compile_clause(&self, index: usize, clause: &ResidualClause) -> Result<FilterTree>;
}

pub fn classify(set: &ResidualSet) -> Outcome<'_> {
    if set.is_empty() {
        return Outcome::Denied;
    }

    // An empty clause is a branch that always holds, whatever the others say.
    if set.clauses.iter().any(ResidualClause::is_empty) {
        return Outcome::Allowed;
    }

    Outcome::Conditional(&set.clauses)
}

/// Resolves a residual set into a decision, compiling clauses with
/// `compiler` and joining them with `Or`.
pub fn resolve<C>(set: &ResidualSet, compiler: &C) -> Result<Decision>
where
    C: ClauseCompiler + ?Sized,
{
    let clauses = match classify(set) {
        Outcome::Denied => return Ok(Decision::Denied),
        Outcome::Allowed => return Ok(Decision::Allowed),
        Outcome::Conditional(clauses) => clauses,
    };

    let mut trees = Vec::with_capacity(clauses.len());
    for (i, clause) in clauses.iter().enumerate() {
        debug!("Residual clause #{}: {}", i + 1, clause);
        trees.push(compiler.compile_clause(i + 1, clause)?);
    }

    let tree = match trees.len() {
        1 => trees.remove(0),
        _ => FilterTree::or(trees),
    };

    Ok(Decision::Conditional(tree))
}
