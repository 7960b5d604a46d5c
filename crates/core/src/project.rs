use crate::cache::PathCache;
use crate::classify::PrefabClassifier;
use crate::config::ResfinderConfig;
use crate::error::{ResfinderError, Result};
use crate::fs::FsDirectoryLister;
use crate::registry::TypeRegistry;
use crate::unity::{ProjectAssetLoader, ScriptIndex, SharedScriptIndex, is_script_path};
use crate::watch::{SaveHook, SaveOutcome, is_relevant_path};
use resfinder_api::DirectoryLister;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{error, info};

/// One Unity project with every collaborator wired up.
pub struct Project {
    root: PathBuf,
    config: ResfinderConfig,
    cache: Arc<PathCache>,
    scripts: SharedScriptIndex,
    registry: RwLock<Arc<TypeRegistry>>,
    loader: ProjectAssetLoader,
    classifier: PrefabClassifier,
}

impl Project {
    /// Opens `root` with the config found there (or defaults).
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let config = ResfinderConfig::load(&root)?;
        Self::with_config(root, config)
    }

    pub fn with_config(root: impl Into<PathBuf>, config: ResfinderConfig) -> Result<Self> {
        Self::with_lister(root, config, Arc::new(FsDirectoryLister::new()))
    }

    pub fn with_lister(
        root: impl Into<PathBuf>,
        config: ResfinderConfig,
        lister: Arc<dyn DirectoryLister>,
    ) -> Result<Self> {
        let root = root.into();
        config.validate()?;

        let assets_root = config.assets_root(&root);
        if !assets_root.is_dir() {
            return Err(ResfinderError::scan_failed(
                &assets_root,
                std::io::Error::new(std::io::ErrorKind::NotFound, "assets folder not found"),
            ));
        }

        let index = ScriptIndex::build(&assets_root)?;
        let registry = TypeRegistry::from_scripts(&index);
        let scripts = SharedScriptIndex::new(index);
        let cache = Arc::new(PathCache::new(
            assets_root.clone(),
            config.sentinel.clone(),
            lister,
        ));
        let loader = ProjectAssetLoader::new(
            cache.clone(),
            scripts.clone(),
            config.prefab_extension.clone(),
        );
        let classifier = PrefabClassifier::new(cache.clone(), config.prefab_extension.clone());

        info!(
            "Opened project {} ({} known types)",
            root.display(),
            registry.len()
        );

        Ok(Self {
            root,
            config,
            cache,
            scripts,
            registry: RwLock::new(Arc::new(registry)),
            loader,
            classifier,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &ResfinderConfig {
        &self.config
    }

    pub fn cache(&self) -> &Arc<PathCache> {
        &self.cache
    }

    /// Current script index snapshot.
    pub fn scripts(&self) -> Arc<ScriptIndex> {
        self.scripts.snapshot()
    }

    /// Current type registry snapshot.
    pub fn registry(&self) -> Arc<TypeRegistry> {
        self.registry
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Rebuilds the script index and type registry from disk.
    ///
    /// On failure the previous index and registry stay in place.
    pub fn reload_scripts(&self) -> Result<()> {
        let index = ScriptIndex::build(&self.config.assets_root(&self.root))?;
        let registry = Arc::new(TypeRegistry::from_scripts(&index));
        let known = registry.len();

        self.scripts.replace(index);
        *self.registry.write().unwrap_or_else(|e| e.into_inner()) = registry;
        info!("Reloaded scripts ({} known types)", known);
        Ok(())
    }

    /// Editor save hook for the whole project.
    ///
    /// Script changes (`.cs` / `.cs.meta`) rebuild the script index and type
    /// registry first; every path is then forwarded to the path cache.
    pub fn on_files_saved<P: AsRef<Path>>(&self, saved: &[P]) -> SaveOutcome {
        let scripts_changed = saved.iter().any(|p| is_script_path(p.as_ref()));
        let scripts_reloaded = scripts_changed
            && match self.reload_scripts() {
                Ok(()) => true,
                Err(e) => {
                    error!("Failed to reload scripts: {}", e);
                    false
                }
            };

        SaveOutcome {
            dropped: self.cache.on_files_saved(saved),
            scripts_reloaded,
        }
    }

    pub fn loader(&self) -> &ProjectAssetLoader {
        &self.loader
    }

    pub fn classifier(&self) -> &PrefabClassifier {
        &self.classifier
    }
}

impl SaveHook for Project {
    fn watch_root(&self) -> &Path {
        self.cache.root()
    }

    fn is_relevant(&self, path: &Path) -> bool {
        is_relevant_path(path, &self.config.sentinel) || is_script_path(path)
    }

    fn on_files_saved(&self, paths: &[PathBuf]) -> SaveOutcome {
        Project::on_files_saved(self, paths)
    }
}
