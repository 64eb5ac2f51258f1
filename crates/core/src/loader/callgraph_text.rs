//! The textual callgraph dump format, one record per line:
//!
//! ```text
//! #<id> <name>          declare function <id> with display name <name>
//! D <caller> <callee>   direct call site between declared ids
//! R <caller> <callee>   resolved indirect call site, same meaning here
//! D/S ..., R/S ...      suppressed variants of the two above
//! T <id> <tag>          tag a function; "GC Call" marks a collector entry
//! ```
//!
//! Blank lines are skipped and unrecognized tags are ignored; anything
//! else that fails to parse is a load error. Ids must be declared before
//! use and never re-declared. Function names may contain spaces, so a
//! declaration splits on the first space only.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::annotations::AnnotationFilter;
use crate::graph::{CallGraph, CallGraphBuilder};
use crate::loader::{GraphLoader, LoadError};
use crate::model::EdgeFlags;

const GC_CALL_TAG: &str = "GC Call";

pub struct CallgraphTextLoader;

impl GraphLoader for CallgraphTextLoader {
    fn load(&self, input: &str, filter: &AnnotationFilter) -> Result<CallGraph, LoadError> {
        let mut names: FxHashMap<u32, String> = FxHashMap::default();
        let mut order: Vec<u32> = Vec::new();
        let mut tagged: FxHashSet<u32> = FxHashSet::default();
        let mut edges: Vec<(u32, u32, bool)> = Vec::new();

        for (index, raw) in input.lines().enumerate() {
            let line = index + 1;
            let text = raw.trim_end();
            if text.is_empty() {
                continue;
            }
            if let Some(rest) = text.strip_prefix('#') {
                let (id, name) = rest
                    .split_once(' ')
                    .ok_or_else(|| malformed(line, "expected '#<id> <name>'"))?;
                let id = parse_id(id, line)?;
                if names.insert(id, name.to_string()).is_some() {
                    return Err(LoadError::DuplicateId { line, id });
                }
                order.push(id);
                continue;
            }
            let (kind, rest) = text
                .split_once(' ')
                .ok_or_else(|| malformed(line, "expected '<kind> <fields>'"))?;
            match kind {
                "D" | "R" | "D/S" | "R/S" => {
                    let (caller, callee) = parse_id_pair(rest, line)?;
                    require_declared(&names, caller, line)?;
                    require_declared(&names, callee, line)?;
                    edges.push((caller, callee, kind.ends_with("/S")));
                }
                "T" => {
                    let (id, tag) = rest
                        .split_once(' ')
                        .ok_or_else(|| malformed(line, "expected 'T <id> <tag>'"))?;
                    let id = parse_id(id, line)?;
                    require_declared(&names, id, line)?;
                    if tag == GC_CALL_TAG {
                        tagged.insert(id);
                    }
                }
                other => {
                    return Err(malformed(line, &format!("unknown record kind '{other}'")));
                }
            }
        }

        // Intern declarations first, in declaration order, so node indices
        // do not depend on which edges survive the filter.
        let mut builder = CallGraphBuilder::new();
        for id in &order {
            builder.intern(&names[id]);
        }
        for (caller, callee, suppressed) in edges {
            let callee_name = &names[&callee];
            if filter.is_ignored(callee_name) {
                continue;
            }
            let triggers = tagged.contains(&callee) || filter.forces_gc(callee_name);
            builder.add_edge(&names[&caller], callee_name, EdgeFlags::new(triggers, suppressed));
        }
        log::info!(
            "loaded {} functions and {} call sites ({} tagged collector entries)",
            builder.node_count(),
            builder.edge_count(),
            tagged.len()
        );
        Ok(builder.finish())
    }

    fn name(&self) -> &'static str {
        "callgraph"
    }
}

fn malformed(line: usize, reason: &str) -> LoadError {
    LoadError::Malformed {
        line,
        reason: reason.to_string(),
    }
}

fn parse_id(field: &str, line: usize) -> Result<u32, LoadError> {
    field
        .parse::<u32>()
        .map_err(|_| malformed(line, &format!("invalid function id '{field}'")))
}

fn parse_id_pair(rest: &str, line: usize) -> Result<(u32, u32), LoadError> {
    let mut fields = rest.split_whitespace();
    let caller = fields
        .next()
        .ok_or_else(|| malformed(line, "expected '<caller> <callee>'"))?;
    let callee = fields
        .next()
        .ok_or_else(|| malformed(line, "expected '<caller> <callee>'"))?;
    if fields.next().is_some() {
        return Err(malformed(line, "trailing fields after '<caller> <callee>'"));
    }
    Ok((parse_id(caller, line)?, parse_id(callee, line)?))
}

fn require_declared(names: &FxHashMap<u32, String>, id: u32, line: usize) -> Result<(), LoadError> {
    if names.contains_key(&id) {
        Ok(())
    } else {
        Err(LoadError::UnknownId { line, id })
    }
}
