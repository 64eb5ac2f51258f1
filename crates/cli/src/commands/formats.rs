use anyhow::Result;
use serde::Serialize;

use gc_hazard_core::loader::default_loader_registry;

#[derive(Debug, Serialize)]
pub struct FormatInfo {
    pub name: String,
    pub description: String,
}

/// List the call graph input formats known to this binary.
pub fn list_formats_command(json: bool) -> Result<()> {
    let registry = default_loader_registry();
    let mut entries: Vec<FormatInfo> = registry
        .names()
        .into_iter()
        .map(|name| {
            let description = match name.as_str() {
                "callgraph" => {
                    "Textual callgraph dump (#id declarations, D/R call records, T tags)"
                        .to_string()
                }
                "jsonl" => "JSON-lines call records with explicit edge flags".to_string(),
                other => format!("Format '{}'", other),
            };
            FormatInfo { name: name.clone(), description }
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("Formats: (none)");
        return Ok(());
    }

    println!("Formats:");
    for entry in entries {
        println!("- {}: {}", entry.name, entry.description);
    }

    Ok(())
}
