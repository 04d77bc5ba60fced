//! Map generation: enumerates the project, analyses each file through the
//! oracle, assembles the map and writes it.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::{FailurePolicy, MapperConfig};
use crate::context::ServiceContext;
use crate::error::MapError;
use crate::map::analyze::analyze_file;
use crate::map::assemble::assemble;
use crate::map::enumerate::enumerate;
use crate::map::{FileAnalysis, ModuleMap};

/// Outcome of a completed run.
#[derive(Debug)]
pub struct MapReport {
    /// The map that was written.
    pub map: ModuleMap,
    /// Per-file failures tolerated under [`FailurePolicy::Skip`].
    pub skipped: Vec<MapError>,
    /// Where the map was written.
    pub output: PathBuf,
}

/// Generates the module map for `config.root` and writes it to
/// `config.output`.
///
/// Files are analysed one at a time in enumeration order. Under
/// [`FailurePolicy::Abort`] the first per-file failure ends the run before
/// anything is written; under [`FailurePolicy::Skip`] the file is left out
/// of the map and listed in the report. Failures not tied to one file
/// abort under either policy.
///
/// # Errors
///
/// Returns an error if enumeration, serialization or the final write
/// fails, or on the first per-file failure when aborting.
pub async fn generate(ctx: &ServiceContext, config: &MapperConfig) -> Result<MapReport, MapError> {
    let files = enumerate(ctx, &config.root, &config.profile)?;
    info!(root = %config.root.display(), files = files.len(), "enumerated source files");
    let universe: BTreeSet<String> = files.iter().cloned().collect();

    let mut analyses: Vec<FileAnalysis> = Vec::with_capacity(files.len());
    let mut skipped = Vec::new();
    for path in &files {
        match analyze_one(ctx, config, &universe, path).await {
            Ok(analysis) => analyses.push(analysis),
            Err(err) if config.on_error == FailurePolicy::Skip && err.is_per_file() => {
                warn!(file = %path, error = %err, "skipping file");
                skipped.push(err);
            }
            Err(err) => return Err(err),
        }
    }

    let map = assemble(&analyses);
    write_map(ctx, &map, &config.output)?;
    info!(
        entries = map.len(),
        skipped = skipped.len(),
        output = %config.output.display(),
        "module map written"
    );

    Ok(MapReport { map, skipped, output: config.output.clone() })
}

async fn analyze_one(
    ctx: &ServiceContext,
    config: &MapperConfig,
    universe: &BTreeSet<String>,
    path: &str,
) -> Result<FileAnalysis, MapError> {
    let content = ctx
        .fs
        .read_to_string(&config.root.join(path))
        .map_err(|e| MapError::ReadFile { path: path.to_string(), message: e.to_string() })?;
    analyze_file(ctx, config, universe, path, &content).await
}

/// Serializes `map` as YAML and writes it to `output`.
///
/// # Errors
///
/// Returns [`MapError::Serialize`] or [`MapError::Write`].
pub fn write_map(ctx: &ServiceContext, map: &ModuleMap, output: &Path) -> Result<(), MapError> {
    let yaml = map.to_yaml()?;
    ctx.fs
        .write(output, &yaml)
        .map_err(|e| MapError::Write { path: output.to_path_buf(), message: e.to_string() })
}
