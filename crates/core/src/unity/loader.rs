use super::prefab::ParsedPrefab;
use super::script_index::SharedScriptIndex;
use crate::cache::PathCache;
use resfinder_api::{AssetLoader, LoadedAsset, ResourcePath};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Loads prefabs from the resources folders of a Unity project.
///
/// `<resource path>/<name>` is looked up in every resolved folder in sorted
/// order and the first existing file wins.
pub struct ProjectAssetLoader {
    cache: Arc<PathCache>,
    scripts: SharedScriptIndex,
    extension: String,
}

impl ProjectAssetLoader {
    pub fn new(
        cache: Arc<PathCache>,
        scripts: SharedScriptIndex,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            cache,
            scripts,
            extension: extension.into(),
        }
    }

    fn locate(&self, resource_path: &ResourcePath, name: &str) -> Option<PathBuf> {
        let dirs = match self.cache.resolve(resource_path) {
            Ok(dirs) => dirs,
            Err(e) => {
                warn!("Cannot resolve '{}': {}", resource_path, e);
                return None;
            }
        };

        let file_name = format!("{}.{}", name, self.extension);
        dirs.iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
    }
}

impl AssetLoader for ProjectAssetLoader {
    fn load(&self, resource_path: &ResourcePath, name: &str) -> Option<LoadedAsset> {
        let Some(path) = self.locate(resource_path, name) else {
            debug!("No asset '{}' under '{}'", name, resource_path);
            return None;
        };

        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                return None;
            }
        };

        let prefab = match ParsedPrefab::parse(&text) {
            Ok(prefab) => prefab,
            Err(e) => {
                warn!("Failed to parse {}: {}", path.display(), e);
                return None;
            }
        };

        Some(LoadedAsset {
            name: name.to_string(),
            path: Some(path),
            components: prefab.component_descriptors(&self.scripts.snapshot()),
        })
    }
}
