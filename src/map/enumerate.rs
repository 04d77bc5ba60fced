//! Discovery of the source files that make up the map.

use std::path::Path;

use tracing::debug;

use crate::config::LanguageProfile;
use crate::context::ServiceContext;
use crate::error::MapError;

/// Returns the sorted project-relative paths of every eligible source file
/// under `root`.
///
/// # Errors
///
/// Returns [`MapError::Enumerate`] if the root is missing or unreadable.
pub fn enumerate(
    ctx: &ServiceContext,
    root: &Path,
    profile: &LanguageProfile,
) -> Result<Vec<String>, MapError> {
    let prune = |name: &str| is_excluded_dir(name, profile);
    let listed = ctx
        .fs
        .list_files(root, &prune)
        .map_err(|e| MapError::Enumerate { root: root.to_path_buf(), message: e.to_string() })?;

    let total = listed.len();
    let mut files: Vec<String> = listed.into_iter().filter(|f| is_eligible(f, profile)).collect();
    files.sort();
    files.dedup();
    debug!(listed = total, eligible = files.len(), "filtered source files");
    Ok(files)
}

/// Returns `true` for directories that are never part of the project:
/// hidden directories and dependency caches.
#[must_use]
pub fn is_excluded_dir(name: &str, profile: &LanguageProfile) -> bool {
    name.starts_with('.') || profile.dependency_dirs.iter().any(|d| d == name)
}

/// Returns `true` if the `/`-separated relative `path` is a source file:
/// a recognized extension, no excluded infix (`.d`, `.test`, `.config`)
/// and no excluded directory anywhere along the way.
#[must_use]
pub fn is_eligible(path: &str, profile: &LanguageProfile) -> bool {
    let mut parts: Vec<&str> = path.split('/').collect();
    let Some(name) = parts.pop() else {
        return false;
    };
    if parts.iter().any(|dir| is_excluded_dir(dir, profile)) {
        return false;
    }

    let Some((stem, ext)) = name.rsplit_once('.') else {
        return false;
    };
    if stem.is_empty() || !profile.extensions.iter().any(|e| e == ext) {
        return false;
    }

    !profile
        .excluded_infixes
        .iter()
        .any(|infix| stem.strip_suffix(infix.as_str()).is_some_and(|rest| rest.ends_with('.')))
}
