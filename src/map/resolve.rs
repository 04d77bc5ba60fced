//! Import specifier resolution: maps a specifier written inside a file to
//! the project-relative path of the file it designates.

use std::collections::BTreeSet;

use crate::config::LanguageProfile;

/// Outcome of resolving one import specifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Package import, or a relative path escaping the project root.
    External,
    /// A candidate path matched an enumerated file.
    Found(String),
    /// No candidate matched; the normalized path with the primary
    /// extension appended.
    Guessed(String),
}

impl Resolution {
    /// The resolved or guessed path, if the specifier is inside the project.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::External => None,
            Self::Found(path) | Self::Guessed(path) => Some(path),
        }
    }
}

/// Returns `true` if `specifier` is written relative to the importing file.
#[must_use]
pub fn is_relative(specifier: &str) -> bool {
    specifier == "."
        || specifier == ".."
        || specifier.starts_with("./")
        || specifier.starts_with("../")
}

/// Resolves `specifier`, written in the file at `importer`, against the
/// enumerated `files`.
///
/// Candidates are tried in order: the path as written, the path with each
/// extension of `profile`, then the directory index file with each
/// extension. The first enumerated candidate wins.
#[must_use]
pub fn resolve_import(
    specifier: &str,
    importer: &str,
    files: &BTreeSet<String>,
    profile: &LanguageProfile,
) -> Resolution {
    if !is_relative(specifier) {
        return Resolution::External;
    }

    let importer_dir = importer.rsplit_once('/').map_or("", |(dir, _)| dir);
    let Some(normalized) = join_normalized(importer_dir, specifier) else {
        return Resolution::External;
    };

    if let Some(found) = candidates(&normalized, profile).into_iter().find(|c| files.contains(c))
    {
        return Resolution::Found(found);
    }

    let guess = if normalized.is_empty() {
        format!("{}.{}", profile.index_stem, profile.primary_extension())
    } else {
        format!("{normalized}.{}", profile.primary_extension())
    };
    Resolution::Guessed(guess)
}

/// Matches a root-relative project path that may omit its extension or
/// name a directory, such as `src/utils/read` for `src/utils/read.ts`.
///
/// Tries the same candidates as [`resolve_import`] but never guesses:
/// `None` unless an enumerated file matches.
#[must_use]
pub fn match_project_path(
    path: &str,
    files: &BTreeSet<String>,
    profile: &LanguageProfile,
) -> Option<String> {
    let normalized = join_normalized("", path)?;
    if normalized.is_empty() {
        return None;
    }
    candidates(&normalized, profile).into_iter().find(|c| files.contains(c))
}

/// Joins `relative` onto `base` and collapses `.` and `..` segments.
///
/// Returns `None` when the path climbs above the project root.
fn join_normalized(base: &str, relative: &str) -> Option<String> {
    let mut parts: Vec<&str> = base.split('/').filter(|p| !p.is_empty()).collect();
    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            name => parts.push(name),
        }
    }
    Some(parts.join("/"))
}

/// Lists candidate paths for `normalized` in priority order.
fn candidates(normalized: &str, profile: &LanguageProfile) -> Vec<String> {
    let mut out = Vec::with_capacity(1 + profile.extensions.len() * 2);
    if !normalized.is_empty() {
        out.push(normalized.to_string());
        out.extend(profile.extensions.iter().map(|ext| format!("{normalized}.{ext}")));
    }
    let index_base = if normalized.is_empty() {
        profile.index_stem.clone()
    } else {
        format!("{normalized}/{}", profile.index_stem)
    };
    out.extend(profile.extensions.iter().map(|ext| format!("{index_base}.{ext}")));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(paths: &[&str]) -> BTreeSet<String> {
        paths.iter().map(|p| (*p).to_string()).collect()
    }

    fn ts() -> LanguageProfile {
        LanguageProfile::typescript()
    }

    #[test]
    fn parent_relative_import_resolves_to_root_relative_path() {
        let set = files(&["src/animals/cats.ts", "src/utils/read.ts"]);
        let resolved = resolve_import("../utils/read", "src/animals/cats.ts", &set, &ts());
        assert_eq!(resolved, Resolution::Found("src/utils/read.ts".into()));
    }

    #[test]
    fn sibling_import_from_root_file() {
        let set = files(&["a.ts", "b.ts"]);
        assert_eq!(resolve_import("./b", "a.ts", &set, &ts()), Resolution::Found("b.ts".into()));
    }

    #[test]
    fn specifier_with_extension_matches_as_is() {
        let set = files(&["src/a.ts", "src/view.jsx"]);
        assert_eq!(
            resolve_import("./view.jsx", "src/a.ts", &set, &ts()),
            Resolution::Found("src/view.jsx".into())
        );
    }

    #[test]
    fn extensions_are_tried_in_profile_order() {
        let set = files(&["src/a.ts", "src/b.js", "src/b.tsx"]);
        assert_eq!(
            resolve_import("./b", "src/a.ts", &set, &ts()),
            Resolution::Found("src/b.tsx".into())
        );
    }

    #[test]
    fn directory_import_resolves_to_index_file() {
        let set = files(&["src/a.ts", "src/utils/index.js"]);
        assert_eq!(
            resolve_import("./utils", "src/a.ts", &set, &ts()),
            Resolution::Found("src/utils/index.js".into())
        );
    }

    #[test]
    fn file_beats_directory_index() {
        let set = files(&["src/a.ts", "src/utils.ts", "src/utils/index.ts"]);
        assert_eq!(
            resolve_import("./utils", "src/a.ts", &set, &ts()),
            Resolution::Found("src/utils.ts".into())
        );
    }

    #[test]
    fn bare_specifier_is_external_even_when_a_local_file_matches() {
        let set = files(&["src/a.ts", "lodash.ts", "src/lodash.ts"]);
        assert_eq!(resolve_import("lodash", "src/a.ts", &set, &ts()), Resolution::External);
        assert_eq!(resolve_import("src/lodash", "src/a.ts", &set, &ts()), Resolution::External);
    }

    #[test]
    fn unresolved_relative_specifier_is_guessed_with_primary_extension() {
        let set = files(&["src/a.ts"]);
        let resolved = resolve_import("./missing/thing", "src/a.ts", &set, &ts());
        assert_eq!(resolved, Resolution::Guessed("src/missing/thing.ts".into()));
        assert_eq!(resolved.path(), Some("src/missing/thing.ts"));
    }

    #[test]
    fn escaping_the_root_is_external() {
        let set = files(&["a.ts"]);
        assert_eq!(resolve_import("../outside", "a.ts", &set, &ts()), Resolution::External);
    }

    #[test]
    fn project_path_without_extension_is_matched() {
        let files = files(&["src/utils/read.ts", "src/ui/index.tsx"]);
        assert_eq!(
            match_project_path("src/utils/read", &files, &ts()).as_deref(),
            Some("src/utils/read.ts")
        );
        assert_eq!(match_project_path("src/ui", &files, &ts()).as_deref(), Some("src/ui/index.tsx"));
        assert_eq!(match_project_path("src/utils/write", &files, &ts()), None);
        assert_eq!(match_project_path("../src/utils/read", &files, &ts()), None);
    }

    #[test]
    fn dot_segments_are_collapsed() {
        let set = files(&["src/x/y.ts", "src/z.ts"]);
        assert_eq!(
            resolve_import("./.././z", "src/x/y.ts", &set, &ts()),
            Resolution::Found("src/z.ts".into())
        );
    }

    #[test]
    fn current_directory_specifier_targets_the_index() {
        let set = files(&["src/index.ts", "src/a.ts"]);
        assert_eq!(
            resolve_import(".", "src/a.ts", &set, &ts()),
            Resolution::Found("src/index.ts".into())
        );
        assert_eq!(
            resolve_import(".", "a.ts", &files(&["a.ts"]), &ts()),
            Resolution::Guessed("index.ts".into())
        );
    }
}
