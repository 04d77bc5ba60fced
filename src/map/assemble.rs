//! Merges per-file analyses into the two-sided module map.

use tracing::debug;

use crate::map::{EdgeFact, FileAnalysis, ModuleEntry, ModuleMap};

/// Builds the map from the analyses of every successfully analysed file.
///
/// Each analysis yields exactly one entry. Edges are then applied in
/// analysis order, see [`assemble_edges`].
#[must_use]
pub fn assemble(analyses: &[FileAnalysis]) -> ModuleMap {
    let descriptions = analyses.iter().map(|a| (a.path.as_str(), a.description.as_str()));
    let facts: Vec<EdgeFact> = analyses.iter().flat_map(FileAnalysis::edge_facts).collect();
    assemble_edges(descriptions, &facts)
}

/// Builds the map from `(path, description)` pairs and a list of facts.
///
/// A fact is applied only when both its source and its target have an
/// entry. When the same `(source, target)` pair appears more than once the
/// last reason wins, on both sides of the edge.
#[must_use]
pub fn assemble_edges<'a>(
    descriptions: impl IntoIterator<Item = (&'a str, &'a str)>,
    facts: &[EdgeFact],
) -> ModuleMap {
    let mut map = ModuleMap::default();
    for (path, description) in descriptions {
        map.modules.insert(path.to_string(), ModuleEntry::new(description));
    }

    let mut dropped = 0usize;
    for fact in facts {
        if !map.modules.contains_key(&fact.source) || !map.modules.contains_key(&fact.target) {
            debug!(source = %fact.source, target = %fact.target, "dropping edge to unmapped file");
            dropped += 1;
            continue;
        }
        if let Some(entry) = map.modules.get_mut(&fact.source) {
            entry.calling.insert(fact.target.clone(), fact.reason.clone());
        }
        if let Some(entry) = map.modules.get_mut(&fact.target) {
            entry.callers.insert(fact.source.clone(), fact.reason.clone());
        }
    }

    debug!(entries = map.len(), facts = facts.len(), dropped, "assembled module map");
    map
}
