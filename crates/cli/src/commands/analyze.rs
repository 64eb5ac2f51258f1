use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use gc_hazard_core::analysis::{AnalysisSummary, GcReachability, Origin};

use crate::commands::{load_call_graph, LoadedInput};

/// Provenance written next to report files so a run can be tied back to
/// the exact input it analyzed.
#[derive(Debug, Serialize, Deserialize)]
pub struct RunMetadata {
    pub input: String,
    pub input_sha256: String,
    pub format: String,
    pub tool_version: String,
    pub started_at: String,
    pub finished_at: String,
}

/// Run the reachability closure and render the results.
pub fn run_analyze_command(
    input: &str,
    format: Option<&str>,
    annotations: Option<&str>,
    json: bool,
    out: Option<&str>,
    dot: Option<&str>,
) -> Result<()> {
    let started_at = Utc::now().to_rfc3339();
    let LoadedInput {
        graph,
        path,
        format,
        sha256,
    } = load_call_graph(input, format, annotations)?;

    let analysis = GcReachability::compute(graph);
    let summary = analysis.summary();
    let finished_at = Utc::now().to_rfc3339();

    // Sorted, materialized views so every rendering of the same input is
    // byte-identical.
    let gc_entries = materialize_chains(&analysis)?;
    let suppressed = sorted_suppressed(&analysis);

    let metadata = RunMetadata {
        input: path,
        input_sha256: sha256,
        format,
        tool_version: gc_hazard_core::version().to_string(),
        started_at,
        finished_at,
    };

    if let Some(dot_path) = dot {
        let rendered = render_witness_dot(&analysis);
        fs::write(dot_path, rendered)
            .with_context(|| format!("Failed to write DOT graph at {}", dot_path))?;
    }

    if let Some(out_dir) = out {
        write_report_files(out_dir, &metadata, &summary, &gc_entries, &suppressed)?;
    }

    if json {
        let report = build_report(&metadata, &summary, &gc_entries, &suppressed);
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Analyzed {}:", metadata.input);
    println!("  Functions: {}", summary.functions);
    println!("  Call sites: {}", summary.call_sites);
    println!(
        "  GC-reaching: {} ({} collector entries)",
        summary.gc_functions, summary.collector_entries
    );
    println!("  Suppressed: {}", summary.suppressed_functions);
    if let Some(out_dir) = out {
        println!("  Output: {}", out_dir);
    }
    if let Some(dot_path) = dot {
        println!("  DOT: {}", dot_path);
    }
    print!("{}", render_text_report(&gc_entries, &suppressed));

    Ok(())
}

/// Materialize every witness chain up front, sorted by function name.
fn materialize_chains(analysis: &GcReachability) -> Result<Vec<(String, Vec<String>)>> {
    let mut names: Vec<&str> = analysis.gc_functions().collect();
    names.sort_unstable();
    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let chain = analysis
            .witness_chain(name)
            .ok_or_else(|| anyhow!("No witness chain recorded for '{}'", name))?
            .into_names()
            .with_context(|| format!("Failed to reconstruct the witness chain for '{}'", name))?;
        entries.push((
            name.to_string(),
            chain.into_iter().map(str::to_string).collect(),
        ));
    }
    Ok(entries)
}

fn sorted_suppressed(analysis: &GcReachability) -> Vec<String> {
    let mut names: Vec<String> = analysis.suppressed_functions().map(str::to_string).collect();
    names.sort_unstable();
    names
}

/// Render the classic report body: one section per GC-reaching function
/// with the rest of its chain indented below it and a final `GC` line
/// standing in for the collection itself, then one section per function
/// with suppressed collector calls.
fn render_text_report(gc_entries: &[(String, Vec<String>)], suppressed: &[String]) -> String {
    let mut out = String::new();
    for (name, chain) in gc_entries {
        out.push_str(&format!("\nGC Function: {}\n", name));
        for step in chain.iter().skip(1) {
            out.push_str(&format!("    {}\n", step));
        }
        out.push_str("    GC\n");
    }
    for name in suppressed {
        out.push_str(&format!("\nSuppressed Function: {}\n", name));
    }
    out
}

fn build_report(
    metadata: &RunMetadata,
    summary: &AnalysisSummary,
    gc_entries: &[(String, Vec<String>)],
    suppressed: &[String],
) -> serde_json::Value {
    let gc_functions: Vec<serde_json::Value> = gc_entries
        .iter()
        .map(|(name, chain)| serde_json::json!({ "name": name, "chain": chain }))
        .collect();
    serde_json::json!({
        "schema_version": 1,
        "tool_version": metadata.tool_version,
        "generated_at": metadata.finished_at,
        "input": {
            "path": metadata.input,
            "format": metadata.format,
            "sha256": metadata.input_sha256,
        },
        "summary": summary,
        "gc_functions": gc_functions,
        "suppressed_functions": suppressed,
    })
}

/// Write the report file set into `out_dir`.
///
/// Produces `gc-functions.txt` (the text report body), `gc-functions.lst`
/// and `suppressed-functions.lst` (sorted name lists), `report.json`, and
/// `run-metadata.json`.
fn write_report_files(
    out_dir: &str,
    metadata: &RunMetadata,
    summary: &AnalysisSummary,
    gc_entries: &[(String, Vec<String>)],
    suppressed: &[String],
) -> Result<()> {
    let out_root = Path::new(out_dir);
    fs::create_dir_all(out_root)
        .with_context(|| format!("Failed to create output dir {}", out_root.display()))?;

    let text_path = out_root.join("gc-functions.txt");
    fs::write(&text_path, render_text_report(gc_entries, suppressed))
        .with_context(|| format!("Failed to write report text at {}", text_path.display()))?;

    let list_path = out_root.join("gc-functions.lst");
    let mut list = String::new();
    for (name, _chain) in gc_entries {
        list.push_str(name);
        list.push('\n');
    }
    fs::write(&list_path, list)
        .with_context(|| format!("Failed to write function list at {}", list_path.display()))?;

    let suppressed_path = out_root.join("suppressed-functions.lst");
    let mut list = String::new();
    for name in suppressed {
        list.push_str(name);
        list.push('\n');
    }
    fs::write(&suppressed_path, list).with_context(|| {
        format!("Failed to write suppressed list at {}", suppressed_path.display())
    })?;

    let report_path = out_root.join("report.json");
    let report = build_report(metadata, summary, gc_entries, suppressed);
    fs::write(&report_path, serde_json::to_string_pretty(&report)?)
        .with_context(|| format!("Failed to write report at {}", report_path.display()))?;

    let metadata_path = out_root.join("run-metadata.json");
    fs::write(&metadata_path, serde_json::to_string_pretty(metadata)?)
        .with_context(|| format!("Failed to write run metadata at {}", metadata_path.display()))?;

    Ok(())
}

/// Render the witness forest as Graphviz DOT.
///
/// Collector entries are boxes; every other discovered function is an
/// ellipse with an edge to the function it was first discovered through.
fn render_witness_dot(analysis: &GcReachability) -> String {
    let mut dot = String::new();
    dot.push_str("digraph GcWitness {\n");
    dot.push_str("  rankdir=LR;\n");
    for (idx, origin) in analysis.discovered() {
        let shape = match origin {
            Origin::Direct => "box",
            Origin::Via(_) => "ellipse",
        };
        dot.push_str(&format!(
            "  f{} [label=\"{}\" shape={}];\n",
            idx.index(),
            escape_label(analysis.graph().name(idx)),
            shape
        ));
    }
    for (idx, origin) in analysis.discovered() {
        if let Origin::Via(pred) = origin {
            dot.push_str(&format!(
                "  f{} -> f{} [label=\"calls\"];\n",
                idx.index(),
                pred.index()
            ));
        }
    }
    dot.push_str("}\n");
    dot
}

fn escape_label(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
