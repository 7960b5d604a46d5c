//! A serialized reference to "the prefab named after this component type,
//! under this resource path".

use crate::classify::{PrefabClassifier, ValidPrefab, classifier::short_type_name};
use crate::error::Result;
use crate::picker::SelectionEvent;
use crate::registry::{TypeEntry, TypeRegistry};
use resfinder_api::{AssetLoader, ComponentDescriptor, LoadedAsset, ResourcePath};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceBinding {
    /// Resource path holding assets named after their component type
    pub resource_path: String,
    /// Fully qualified type name of the selected component, or empty
    pub selected_component_type: String,
}

impl ResourceBinding {
    pub fn new(resource_path: impl Into<String>) -> Self {
        Self {
            resource_path: resource_path.into(),
            selected_component_type: String::new(),
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn resource_path(&self) -> ResourcePath {
        ResourcePath::new(&self.resource_path)
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_component_type.is_empty()
    }

    /// Selected type name without its namespace.
    pub fn selected_short_name(&self) -> &str {
        short_type_name(&self.selected_component_type)
    }

    /// The selected type, if it is set and still known to `registry`.
    pub fn selected_type<'r>(&self, registry: &'r TypeRegistry) -> Option<&'r TypeEntry> {
        if !self.has_selection() {
            return None;
        }
        let entry = registry.resolve(&self.selected_component_type);
        if entry.is_none() {
            debug!(
                "Selected type '{}' does not resolve; treating as no selection",
                self.selected_component_type
            );
        }
        entry
    }

    /// Loads the selected prefab and returns it with its matching component.
    pub fn selected_asset(
        &self,
        classifier: &PrefabClassifier,
        registry: &TypeRegistry,
        loader: &dyn AssetLoader,
    ) -> Option<(LoadedAsset, ComponentDescriptor)> {
        let entry = self.selected_type(registry)?;
        classifier.resolve_by_type(&self.resource_path(), &entry.full_name(), loader)
    }

    /// Every usable prefab under this binding's resource path.
    pub fn find_all_prefabs(
        &self,
        classifier: &PrefabClassifier,
        loader: &dyn AssetLoader,
    ) -> Result<Vec<ValidPrefab>> {
        classifier.find_valid_prefabs(&self.resource_path(), loader)
    }

    pub fn select(&mut self, component: &ComponentDescriptor) {
        self.selected_component_type = component.full_name();
    }

    pub fn clear_selection(&mut self) {
        self.selected_component_type.clear();
    }

    pub fn apply(&mut self, event: SelectionEvent) {
        match event {
            SelectionEvent::Cleared => self.clear_selection(),
            SelectionEvent::Selected { full_type_name } => {
                self.selected_component_type = full_type_name
            }
        }
    }
}
