//! JSON-lines call records, one object per line:
//!
//! ```text
//! {"caller": "f", "callee": "g", "triggers_gc": true, "suppressed": false}
//! ```
//!
//! Both flags default to false when omitted. Functions are created
//! implicitly from the names on the edges, so this format needs no
//! declarations.

use serde::Deserialize;

use crate::annotations::AnnotationFilter;
use crate::graph::{CallGraph, CallGraphBuilder};
use crate::loader::{GraphLoader, LoadError};
use crate::model::EdgeFlags;

pub struct JsonLinesLoader;

#[derive(Debug, Deserialize)]
struct CallRecord {
    caller: String,
    callee: String,
    #[serde(default)]
    triggers_gc: bool,
    #[serde(default)]
    suppressed: bool,
}

impl GraphLoader for JsonLinesLoader {
    fn load(&self, input: &str, filter: &AnnotationFilter) -> Result<CallGraph, LoadError> {
        let mut builder = CallGraphBuilder::new();
        for (index, raw) in input.lines().enumerate() {
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }
            let record: CallRecord = serde_json::from_str(text).map_err(|source| {
                LoadError::Record {
                    line: index + 1,
                    source,
                }
            })?;
            if filter.is_ignored(&record.callee) {
                continue;
            }
            let triggers = record.triggers_gc || filter.forces_gc(&record.callee);
            builder.add_edge(
                &record.caller,
                &record.callee,
                EdgeFlags::new(triggers, record.suppressed),
            );
        }
        log::info!(
            "loaded {} functions and {} call sites",
            builder.node_count(),
            builder.edge_count()
        );
        Ok(builder.finish())
    }

    fn name(&self) -> &'static str {
        "jsonl"
    }
}
