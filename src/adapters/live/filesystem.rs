//! Live filesystem adapter using `std::fs` and `walkdir`.

use std::path::Path;

use walkdir::WalkDir;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(std::fs::write(path, contents)?)
    }

    fn list_files(
        &self,
        root: &Path,
        prune: &dyn Fn(&str) -> bool,
    ) -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>> {
        if !root.is_dir() {
            return Err(format!("{} is not a readable directory", root.display()).into());
        }

        let walker = WalkDir::new(root).follow_links(false).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !prune(&entry.file_name().to_string_lossy())
        });

        let mut files = Vec::new();
        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Ok(rel) = entry.path().strip_prefix(root) else {
                continue;
            };
            let parts: Vec<String> =
                rel.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
            files.push(parts.join("/"));
        }
        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_files_prunes_directories_and_sorts() {
        let dir = std::env::temp_dir().join("modmap_live_fs_list");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(dir.join("src/nested")).unwrap();
        std::fs::create_dir_all(dir.join("node_modules/pkg")).unwrap();
        std::fs::write(dir.join("src/b.ts"), "").unwrap();
        std::fs::write(dir.join("src/nested/a.ts"), "").unwrap();
        std::fs::write(dir.join("node_modules/pkg/index.ts"), "").unwrap();

        let files = LiveFileSystem.list_files(&dir, &|name| name == "node_modules").unwrap();
        assert_eq!(files, vec!["src/b.ts", "src/nested/a.ts"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn list_files_errors_on_missing_root() {
        let dir = std::env::temp_dir().join("modmap_live_fs_missing");
        let _ = std::fs::remove_dir_all(&dir);
        assert!(LiveFileSystem.list_files(&dir, &|_| false).is_err());
    }

    #[test]
    fn write_creates_parent_directories() {
        let dir = std::env::temp_dir().join("modmap_live_fs_write");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("deep/er/map.yaml");

        LiveFileSystem.write(&path, "{}\n").unwrap();
        assert_eq!(LiveFileSystem.read_to_string(&path).unwrap(), "{}\n");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
