use super::distance::levenshtein;
use crate::cache::PathCache;
use crate::error::{ResfinderError, Result};
use resfinder_api::{
    AssetLoader, Classification, ClassifyReport, ComponentDescriptor, LoadedAsset,
    PrefabCandidate, PrefabFile, ResourcePath, Suggestion,
};
use std::sync::Arc;
use tracing::{debug, info};

/// A usable prefab together with the component that makes it usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidPrefab {
    pub file: PrefabFile,
    pub asset: LoadedAsset,
    pub component: ComponentDescriptor,
}

/// Finds prefab files under a resource path and sorts them into usable and
/// unusable ones.
pub struct PrefabClassifier {
    cache: Arc<PathCache>,
    extension: String,
}

impl PrefabClassifier {
    pub fn new(cache: Arc<PathCache>, extension: impl Into<String>) -> Self {
        Self {
            cache,
            extension: extension.into(),
        }
    }

    pub fn cache(&self) -> &Arc<PathCache> {
        &self.cache
    }

    /// Every prefab file in every directory the resource path resolves to,
    /// ordered by file name (ordinal), then by full path.
    pub fn list_prefab_files(&self, resource_path: &ResourcePath) -> Result<Vec<PrefabFile>> {
        let dirs = self.cache.resolve(resource_path)?;
        let lister = self.cache.lister();

        let mut files = Vec::new();
        for dir in dirs.iter() {
            let paths = lister
                .list_files(dir, &self.extension)
                .map_err(|e| ResfinderError::scan_failed(dir, e))?;
            files.extend(paths.iter().filter_map(|p| PrefabFile::from_path(p)));
        }

        files.sort_by(|a, b| {
            a.file_name()
                .cmp(b.file_name())
                .then_with(|| a.path.cmp(&b.path))
        });
        debug!("Found {} prefab files under '{}'", files.len(), resource_path);
        Ok(files)
    }

    /// Loads each file through `loader` and partitions it into valid and
    /// invalid candidates. Input order is preserved within each list.
    pub fn classify(
        &self,
        resource_path: &ResourcePath,
        files: &[PrefabFile],
        loader: &dyn AssetLoader,
    ) -> ClassifyReport {
        let mut report = ClassifyReport::new(resource_path.clone());

        for file in files {
            let classification = match loader.load(resource_path, &file.base_name) {
                None => {
                    debug!("Could not load '{}/{}'", resource_path, file.base_name);
                    Classification::Invalid { suggestion: None }
                }
                Some(asset) => Self::classify_asset(&file.base_name, &asset),
            };

            report.push(PrefabCandidate {
                file: file.clone(),
                classification,
            });
        }

        info!(
            "Classified {} prefabs under '{}': {} valid, {} invalid",
            report.total(),
            resource_path,
            report.valid.len(),
            report.invalid.len()
        );
        report
    }

    /// `list_prefab_files` followed by `classify`.
    pub fn scan(
        &self,
        resource_path: &ResourcePath,
        loader: &dyn AssetLoader,
    ) -> Result<ClassifyReport> {
        let files = self.list_prefab_files(resource_path)?;
        Ok(self.classify(resource_path, &files, loader))
    }

    fn classify_asset(base_name: &str, asset: &LoadedAsset) -> Classification {
        match asset.component_named(base_name) {
            Some(component) => Classification::Valid {
                component_type: component.type_name.clone(),
            },
            None => Classification::Invalid {
                suggestion: Self::closest_to(base_name, asset),
            },
        }
    }

    /// Component whose type name is closest to the asset's name.
    /// Ties go to the component declared first.
    pub fn suggest_closest_component(asset: &LoadedAsset) -> Option<Suggestion> {
        Self::closest_to(&asset.name, asset)
    }

    fn closest_to(name: &str, asset: &LoadedAsset) -> Option<Suggestion> {
        let mut best: Option<Suggestion> = None;
        for component in &asset.components {
            let distance = levenshtein(name, &component.type_name);
            if best.as_ref().is_none_or(|b| distance < b.distance) {
                best = Some(Suggestion {
                    component_name: component.type_name.clone(),
                    distance,
                });
            }
        }
        best
    }

    /// Every usable prefab under `resource_path`, loaded.
    pub fn find_valid_prefabs(
        &self,
        resource_path: &ResourcePath,
        loader: &dyn AssetLoader,
    ) -> Result<Vec<ValidPrefab>> {
        let files = self.list_prefab_files(resource_path)?;
        let prefabs = files
            .into_iter()
            .filter_map(|file| {
                let asset = loader.load(resource_path, &file.base_name)?;
                let component = asset.component_named(&file.base_name)?.clone();
                Some(ValidPrefab {
                    file,
                    asset,
                    component,
                })
            })
            .collect();
        Ok(prefabs)
    }

    /// Loads the asset named after `type_name` and returns its component of
    /// that type. `type_name` may be namespace-qualified; only the trailing
    /// segment names the asset, but a qualified name must also match the
    /// component's namespace.
    pub fn resolve_by_type(
        &self,
        resource_path: &ResourcePath,
        type_name: &str,
        loader: &dyn AssetLoader,
    ) -> Option<(LoadedAsset, ComponentDescriptor)> {
        let short_name = short_type_name(type_name);
        if short_name.is_empty() {
            return None;
        }

        let asset = loader.load(resource_path, short_name)?;
        let component = asset
            .components
            .iter()
            .find(|c| {
                c.type_name == short_name && (type_name == short_name || c.full_name() == type_name)
            })?
            .clone();
        Some((asset, component))
    }
}

/// Trailing segment of a dot-qualified type name.
pub fn short_type_name(type_name: &str) -> &str {
    match type_name.rfind('.') {
        Some(ix) => &type_name[ix + 1..],
        None => type_name,
    }
}
