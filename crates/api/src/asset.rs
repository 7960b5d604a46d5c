//! Collaborator traits consumed by the classifier.
//!
//! The core never touches the asset pipeline or the filesystem directly:
//! - `DirectoryLister` enumerates folders and files
//! - `AssetLoader` materializes a named asset into a `LoadedAsset`

use crate::resource::ResourcePath;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A behavior attached to a loaded object, identified by its declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentDescriptor {
    /// Short type name, e.g. `PlayerPanel`
    pub type_name: String,
    /// Enclosing namespace, if any, e.g. `Game.UI`
    pub namespace: Option<String>,
}

impl ComponentDescriptor {
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            namespace: None,
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Fully qualified name (`Namespace.Type`, or just `Type`)
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) if !ns.is_empty() => format!("{}.{}", ns, self.type_name),
            _ => self.type_name.clone(),
        }
    }
}

/// An asset as handed back by an `AssetLoader`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedAsset {
    /// Base name the asset was loaded under
    pub name: String,
    /// Backing file, when the loader knows it
    pub path: Option<PathBuf>,
    /// Components on the root object, in declaration order
    pub components: Vec<ComponentDescriptor>,
}

impl LoadedAsset {
    pub fn new(name: impl Into<String>, components: Vec<ComponentDescriptor>) -> Self {
        Self {
            name: name.into(),
            path: None,
            components,
        }
    }

    /// First component whose short type name equals `type_name` exactly.
    pub fn component_named(&self, type_name: &str) -> Option<&ComponentDescriptor> {
        self.components.iter().find(|c| c.type_name == type_name)
    }
}

/// Asset loader - knows how to turn `<resource path>/<name>` into an object
pub trait AssetLoader: Send + Sync {
    /// Load the asset `name` under `resource_path`.
    /// Returns `None` when nothing loadable exists under that name.
    fn load(&self, resource_path: &ResourcePath, name: &str) -> Option<LoadedAsset>;
}

/// Directory lister - knows how to enumerate folders and files
pub trait DirectoryLister: Send + Sync {
    /// All directories below `root` (recursive) whose name is exactly `name`
    fn list_directories(&self, root: &Path, name: &str) -> std::io::Result<Vec<PathBuf>>;

    /// Files directly inside `dir` with the given extension (no leading dot)
    fn list_files(&self, dir: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>>;

    /// Whether `path` exists and is a directory
    fn is_dir(&self, path: &Path) -> bool;
}
