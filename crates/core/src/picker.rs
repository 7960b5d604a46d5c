//! Presentation model for choosing a prefab from a classification report.
//!
//! Renderers (the CLI, an editor panel) display a `PickerView` and feed the
//! chosen option index back through `PickerView::choose`.

use crate::binding::ResourceBinding;
use crate::classify::PrefabClassifier;
use resfinder_api::{AssetLoader, ClassifyReport, ResourcePath};
use serde::Serialize;
use tracing::warn;

pub const NONE_OPTION: &str = "[none]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerStatus {
    /// At least one usable prefab exists
    Valid,
    /// Nothing usable yet
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusablePrefab {
    pub name: String,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SelectionEvent {
    Cleared,
    Selected { full_type_name: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerView {
    pub resource_path: ResourcePath,
    pub header: String,
    /// `[none]` followed by the usable prefab names
    pub options: Vec<String>,
    pub selected_index: usize,
    pub status: PickerStatus,
    pub unusable: Vec<UnusablePrefab>,
}

impl PickerView {
    pub fn build(report: &ClassifyReport, binding: &ResourceBinding) -> Self {
        let selected = binding.selected_short_name();

        let mut options = Vec::with_capacity(report.valid.len() + 1);
        options.push(NONE_OPTION.to_string());
        options.extend(report.valid_names().map(str::to_string));

        let selected_index = if selected.is_empty() {
            0
        } else {
            report
                .valid_names()
                .position(|name| name == selected)
                .map_or(0, |ix| ix + 1)
        };

        let (header, status) = if report.valid.is_empty() {
            (
                "No Valid Prefabs at Resource Path".to_string(),
                PickerStatus::Pending,
            )
        } else {
            (
                format!("Selected Resource Prefab ({})", report.valid.len()),
                PickerStatus::Valid,
            )
        };

        let unusable = report
            .invalid
            .iter()
            .map(|c| UnusablePrefab {
                name: c.base_name().to_string(),
                hint: c.suggestion().map(|s| {
                    format!(
                        "closest component: {} (distance {})",
                        s.component_name, s.distance
                    )
                }),
            })
            .collect();

        Self {
            resource_path: report.resource_path.clone(),
            header,
            options,
            selected_index,
            status,
            unusable,
        }
    }

    pub fn selected_name(&self) -> Option<&str> {
        match self.selected_index {
            0 => None,
            ix => self.options.get(ix).map(String::as_str),
        }
    }

    pub fn option_index(&self, name: &str) -> Option<usize> {
        self.options.iter().skip(1).position(|o| o == name).map(|ix| ix + 1)
    }

    /// Turns a chosen option into a selection event.
    ///
    /// Returns `None` when `index` is already selected, or when the chosen
    /// prefab can no longer be loaded.
    pub fn choose(
        &self,
        index: usize,
        classifier: &PrefabClassifier,
        loader: &dyn AssetLoader,
    ) -> Option<SelectionEvent> {
        if index == self.selected_index {
            return None;
        }
        if index == 0 || index >= self.options.len() {
            return Some(SelectionEvent::Cleared);
        }

        let name = &self.options[index];
        match classifier.resolve_by_type(&self.resource_path, name, loader) {
            Some((_, component)) => Some(SelectionEvent::Selected {
                full_type_name: component.full_name(),
            }),
            None => {
                warn!("Prefab '{}/{}' vanished before selection", self.resource_path, name);
                None
            }
        }
    }
}
