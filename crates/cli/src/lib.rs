use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};

use gc_hazard_core::annotations::{AnnotationConfig, AnnotationFilter};

pub mod commands;

/// Compute the SHA-256 hash of a byte buffer and return it as a hex string.
pub fn sha256_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let digest = hasher.finalize();
    format!("{:x}", digest)
}

/// Pick a loader name from the input file extension when the user did not
/// choose one explicitly.
///
/// `.jsonl` and `.json` parse as JSON-lines call records; everything else
/// parses as the textual callgraph dump.
pub fn infer_format(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("jsonl") | Some("json") => "jsonl",
        _ => "callgraph",
    }
}

/// Load and compile an annotation file, or produce the pass-through filter
/// when no file was given.
///
/// The file parses as JSON for a `.json` extension and as YAML otherwise.
pub fn load_annotation_filter(path: Option<&Path>) -> Result<AnnotationFilter> {
    let Some(path) = path else {
        return Ok(AnnotationFilter::empty());
    };
    let bytes = fs::read(path)
        .with_context(|| format!("Failed to read annotations at {}", path.display()))?;
    let config: AnnotationConfig = if path.extension().and_then(|ext| ext.to_str()) == Some("json")
    {
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse annotations JSON at {}", path.display()))?
    } else {
        serde_yaml::from_slice(&bytes)
            .with_context(|| format!("Failed to parse annotations YAML at {}", path.display()))?
    };
    let filter = config
        .compile()
        .with_context(|| format!("Invalid annotations at {}", path.display()))?;
    Ok(filter)
}
