//! Filesystem-backed `DirectoryLister`.

use resfinder_api::DirectoryLister;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Lists directories and files straight from disk.
///
/// Any error met during a walk aborts the listing; callers turn it into a
/// scan failure rather than caching a partial result.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsDirectoryLister;

impl FsDirectoryLister {
    pub fn new() -> Self {
        Self
    }
}

impl DirectoryLister for FsDirectoryLister {
    fn list_directories(&self, root: &Path, name: &str) -> std::io::Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
        {
            let entry = entry?;
            if entry.file_type().is_dir() && entry.file_name().to_str() == Some(name) {
                found.push(entry.into_path());
            }
        }
        Ok(found)
    }

    fn list_files(&self, dir: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) == Some(extension) {
                found.push(path);
            }
        }
        Ok(found)
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}
