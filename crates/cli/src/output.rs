use crate::{commands::OutputFormat, error::CliError};
use connectors::{FilterCompiler, elastic::ElasticFilterCompiler};
use model::Decision;
use serde::Serialize;
use serde_json::json;

/// JSON form of a decision. With [`OutputFormat::Es`] a conditional decision
/// carries the compiled search filter instead of the tree.
pub fn render_decision(
    decision: &Decision,
    format: OutputFormat,
) -> Result<serde_json::Value, CliError> {
    match (decision, format) {
        (Decision::Conditional(tree), OutputFormat::Es) => Ok(json!({
            "decision": "conditional",
            "query": ElasticFilterCompiler::compile(tree),
        })),
        _ => Ok(serde_json::to_value(decision)?),
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
