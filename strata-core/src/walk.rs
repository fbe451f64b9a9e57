//! Recursive file listing for source trees and template directories.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// A directory entry could not be read while walking.
#[derive(Debug, Error)]
#[error("cannot walk {path}: {source}")]
pub struct WalkError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// A regular file found under a walked directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    pub path: PathBuf,
    /// Path relative to the walked directory, `/`-separated.
    pub key: String,
}

/// Every regular file under `dir`, recursively, ordered by key.
pub fn files_under(dir: &Path) -> Result<Vec<WalkedFile>, WalkError> {
    let mut paths = Vec::new();
    collect(dir, &mut paths)?;
    let mut files: Vec<WalkedFile> = paths
        .into_iter()
        .map(|path| {
            let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
            let key = rel.to_string_lossy().replace('\\', "/");
            WalkedFile { path, key }
        })
        .collect();
    files.sort_by(|a, b| a.key.cmp(&b.key));
    Ok(files)
}

fn collect(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), WalkError> {
    for entry in std::fs::read_dir(dir).map_err(err(dir))? {
        let entry = entry.map_err(err(dir))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(err(&path))?;
        if file_type.is_dir() {
            collect(&path, out)?;
        } else if file_type.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn err(path: &Path) -> impl FnOnce(std::io::Error) -> WalkError {
    let path = path.to_path_buf();
    move |source| WalkError { path, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lists_nested_files_with_slash_keys() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("posts/2024")).unwrap();
        std::fs::write(dir.path().join("posts/2024/b.md"), "b").unwrap();
        std::fs::write(dir.path().join("a.md"), "a").unwrap();

        let files = files_under(dir.path()).unwrap();
        let keys: Vec<_> = files.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, vec!["a.md", "posts/2024/b.md"]);
        assert_eq!(files[1].path, dir.path().join("posts/2024/b.md"));
    }

    #[test]
    fn missing_directory_names_the_path() {
        let dir = TempDir::new().unwrap();
        let gone = dir.path().join("gone");
        let err = files_under(&gone).unwrap_err();
        assert_eq!(err.path, gone);
    }
}
