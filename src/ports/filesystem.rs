//! Filesystem port for enumerating, reading and writing project files.

use std::path::Path;

/// Provides filesystem access for the mapper.
///
/// Abstracting the filesystem allows deterministic replay and testing
/// without touching the real disk.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Writes the given contents to a file, creating missing parent
    /// directories and overwriting any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;

    /// Recursively lists the files under `root` as `/`-separated paths
    /// relative to `root`, sorted lexicographically.
    ///
    /// Directories for which `prune` returns `true` (called with the
    /// directory's own name) are not descended into. Implementations that
    /// cannot prune may return their files anyway; callers filter again.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is missing or cannot be read.
    fn list_files(
        &self,
        root: &Path,
        prune: &dyn Fn(&str) -> bool,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}
