use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};

use gc_hazard_core::graph::CallGraph;
use gc_hazard_core::loader::default_loader_registry;

use crate::{infer_format, load_annotation_filter, sha256_bytes};

/// A loaded call graph plus the provenance reports want to carry.
pub struct LoadedInput {
    pub graph: CallGraph,
    pub path: String,
    pub format: String,
    pub sha256: String,
}

/// Read, hash, and parse a call graph dump with the selected loader.
///
/// The format comes from the explicit flag when given, otherwise from the
/// input file extension. Any read or parse failure aborts here; commands
/// never see a partially loaded graph.
pub fn load_call_graph(
    input: &str,
    format_override: Option<&str>,
    annotations: Option<&str>,
) -> Result<LoadedInput> {
    let path = Path::new(input);
    let body = fs::read_to_string(path)
        .with_context(|| format!("Failed to read call graph at {}", path.display()))?;
    let sha256 = sha256_bytes(body.as_bytes());
    let filter = load_annotation_filter(annotations.map(Path::new))?;

    let format = match format_override {
        Some(name) => name.to_string(),
        None => infer_format(path).to_string(),
    };
    let registry = default_loader_registry();
    let loader = registry.get(&format).ok_or_else(|| {
        anyhow!("Format '{}' not found (available: {:?})", format, registry.names())
    })?;

    let graph = loader
        .load(&body, &filter)
        .with_context(|| format!("Failed to parse {} as '{}'", path.display(), format))?;
    log::debug!("parsed {} with the '{}' loader", path.display(), format);

    Ok(LoadedInput {
        graph,
        path: path.display().to_string(),
        format,
        sha256,
    })
}
