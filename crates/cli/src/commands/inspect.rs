use anyhow::Result;

use crate::commands::{load_call_graph, LoadedInput};

/// Load a call graph and report its shape without running the analysis.
///
/// Useful for checking that a dump parses and that annotations do what
/// was intended before paying for the closure on a large graph.
pub fn run_inspect_command(
    input: &str,
    format: Option<&str>,
    annotations: Option<&str>,
    json: bool,
) -> Result<()> {
    let loaded = load_call_graph(input, format, annotations)?;
    let LoadedInput {
        graph,
        path,
        format,
        sha256,
    } = loaded;

    let mut gc_call_sites = 0usize;
    let mut suppressed_call_sites = 0usize;
    for (_caller, _callee, flags) in graph.edges() {
        if flags.triggers_gc {
            gc_call_sites += 1;
        }
        if flags.suppressed {
            suppressed_call_sites += 1;
        }
    }

    if json {
        let body = serde_json::json!({
            "path": path,
            "format": format,
            "sha256": sha256,
            "functions": graph.node_count(),
            "call_sites": graph.edge_count(),
            "gc_call_sites": gc_call_sites,
            "suppressed_call_sites": suppressed_call_sites,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("Call graph {}:", path);
    println!("  Format: {}", format);
    println!("  SHA-256: {}", sha256);
    println!("  Functions: {}", graph.node_count());
    println!("  Call sites: {}", graph.edge_count());
    println!("  GC call sites: {}", gc_call_sites);
    println!("  Suppressed call sites: {}", suppressed_call_sites);

    Ok(())
}
