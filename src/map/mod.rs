//! Module map generation: a two-sided dependency graph of a source tree.

pub mod analyze;
pub mod assemble;
pub mod enumerate;
pub mod generator;
pub mod resolve;
pub mod tools;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Everything recorded about one source file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModuleEntry {
    /// What the file is for, as described by the oracle.
    pub description: String,
    /// Files this file references, with the reason for each.
    #[serde(default)]
    pub calling: BTreeMap<String, String>,
    /// Files referencing this file, with the reason for each.
    #[serde(default)]
    pub callers: BTreeMap<String, String>,
}

impl ModuleEntry {
    /// Creates an entry with no edges.
    #[must_use]
    pub fn new(description: impl Into<String>) -> Self {
        Self { description: description.into(), ..Self::default() }
    }
}

/// Project-relative path to [`ModuleEntry`], sorted by path.
///
/// Serializes as a plain YAML mapping so the file on disk is
/// `path: {description, calling, callers}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ModuleMap {
    /// Entries keyed by project-relative path.
    pub modules: BTreeMap<String, ModuleEntry>,
}

impl ModuleMap {
    /// Number of files in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Looks up the entry for `path`.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ModuleEntry> {
        self.modules.get(path)
    }

    /// Renders the map as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// One reported relationship: `source` references `target` for `reason`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeFact {
    /// Referencing file.
    pub source: String,
    /// Referenced file, project-relative.
    pub target: String,
    /// Why `source` references `target`.
    pub reason: String,
}

/// The oracle's account of a single file, with normalized targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileAnalysis {
    /// Project-relative path of the analysed file.
    pub path: String,
    /// Description of the file's purpose.
    pub description: String,
    /// `(target, reason)` pairs in reply order.
    pub calls: Vec<(String, String)>,
}

impl FileAnalysis {
    /// Flattens the analysis into edge facts sourced at this file.
    pub fn edge_facts(&self) -> impl Iterator<Item = EdgeFact> + '_ {
        self.calls.iter().map(|(target, reason)| EdgeFact {
            source: self.path.clone(),
            target: target.clone(),
            reason: reason.clone(),
        })
    }
}
