//! Resource directory cache keyed by resource path.
//!
//! Resolving a resource path means walking the whole assets tree for
//! sentinel folders, so results are kept until a change under
//! `<sentinel>/<resource path>` invalidates them.

use crate::error::{ResfinderError, Result};
use resfinder_api::{DirectoryLister, ResourcePath};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

#[derive(Default)]
struct CacheState {
    entries: HashMap<ResourcePath, Arc<[PathBuf]>>,
    /// Bumped by every invalidation so in-flight scans know not to cache
    generation: u64,
}

pub struct PathCache {
    root: PathBuf,
    sentinel: String,
    lister: Arc<dyn DirectoryLister>,
    state: RwLock<CacheState>,
}

impl PathCache {
    pub fn new(
        root: impl Into<PathBuf>,
        sentinel: impl Into<String>,
        lister: Arc<dyn DirectoryLister>,
    ) -> Self {
        Self {
            root: root.into(),
            sentinel: sentinel.into(),
            lister,
            state: RwLock::new(CacheState::default()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    pub fn lister(&self) -> &Arc<dyn DirectoryLister> {
        &self.lister
    }

    /// Directories of the form `<root>/**/<sentinel>/<resource_path>`.
    ///
    /// The result is sorted and cached, including the empty result. A scan
    /// error leaves the cache untouched for `resource_path`.
    pub fn resolve(&self, resource_path: &ResourcePath) -> Result<Arc<[PathBuf]>> {
        let generation = {
            let state = self.read();
            if let Some(dirs) = state.entries.get(resource_path) {
                return Ok(dirs.clone());
            }
            state.generation
        };

        let dirs = self.scan(resource_path)?;

        let mut state = self.write();
        if state.generation == generation {
            state.entries.insert(resource_path.clone(), dirs.clone());
        } else {
            // An invalidation landed while scanning; the scan may predate it.
            debug!(
                "Not caching '{}': cache was invalidated during the scan",
                resource_path
            );
        }
        Ok(dirs)
    }

    fn scan(&self, resource_path: &ResourcePath) -> Result<Arc<[PathBuf]>> {
        let start = std::time::Instant::now();
        let sentinels = self
            .lister
            .list_directories(&self.root, &self.sentinel)
            .map_err(|e| ResfinderError::scan_failed(&self.root, e))?;

        let mut dirs: Vec<PathBuf> = sentinels
            .iter()
            .map(|dir| resource_path.join_onto(dir))
            .filter(|candidate| self.lister.is_dir(candidate))
            .collect();
        dirs.sort();
        dirs.dedup();

        info!(
            "Resolved '{}' to {} of {} {} folders in {:?}",
            resource_path,
            dirs.len(),
            sentinels.len(),
            self.sentinel,
            start.elapsed()
        );

        Ok(dirs.into())
    }

    /// Drops every cached resource path that one of `changed` lies under.
    /// Returns how many entries were dropped.
    pub fn invalidate<P: AsRef<Path>>(&self, changed: &[P]) -> usize {
        if changed.is_empty() {
            return 0;
        }

        let mut state = self.write();
        state.generation += 1;
        if state.entries.is_empty() {
            return 0;
        }

        let sentinel = &self.sentinel;
        let stale: Vec<ResourcePath> = state
            .entries
            .keys()
            .filter(|key| {
                changed
                    .iter()
                    .any(|p| key.is_under_sentinel(p.as_ref(), sentinel))
            })
            .cloned()
            .collect();

        for key in &stale {
            debug!("Invalidating cached resource path '{}'", key);
            state.entries.remove(key);
        }
        stale.len()
    }

    /// Save-hook entry point: the host reports saved files here.
    pub fn on_files_saved<P: AsRef<Path>>(&self, saved: &[P]) -> usize {
        self.invalidate(saved)
    }

    pub fn clear(&self) {
        let mut state = self.write();
        state.entries.clear();
        state.generation += 1;
    }

    pub fn len(&self) -> usize {
        self.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().entries.is_empty()
    }

    pub fn cached_resource_paths(&self) -> Vec<ResourcePath> {
        let mut keys: Vec<_> = self.read().entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    fn read(&self) -> RwLockReadGuard<'_, CacheState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CacheState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
