use anyhow::{anyhow, Context, Result};

use gc_hazard_core::analysis::GcReachability;

use crate::commands::{load_call_graph, LoadedInput};

/// Print the witness call chain for a single function.
///
/// A function that exists but cannot reach a collection is a valid
/// answer, not an error; asking about a name the graph never saw is.
pub fn run_chain_command(
    input: &str,
    format: Option<&str>,
    annotations: Option<&str>,
    function: &str,
) -> Result<()> {
    let LoadedInput { graph, .. } = load_call_graph(input, format, annotations)?;
    let analysis = GcReachability::compute(graph);

    if analysis.graph().lookup(function).is_none() {
        return Err(anyhow!(
            "Function '{}' does not appear in the call graph",
            function
        ));
    }

    match analysis.witness_chain(function) {
        Some(chain) => {
            let names = chain
                .into_names()
                .with_context(|| format!("Failed to reconstruct the witness chain for '{}'", function))?;
            println!("GC Function: {}", function);
            for step in names.iter().skip(1) {
                println!("    {}", step);
            }
            println!("    GC");
        }
        None => {
            println!("{} cannot reach a collection", function);
            if analysis.has_suppressed_call(function) {
                println!("  (it has suppressed collector calls)");
            }
        }
    }

    Ok(())
}
