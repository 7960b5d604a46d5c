use crate::resource::ResourcePath;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A prefab file found under a resolved resources directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefabFile {
    pub path: PathBuf,
    /// File name without extension
    pub base_name: String,
}

impl PrefabFile {
    /// Builds a descriptor from a path, or `None` if it has no usable file stem.
    pub fn from_path(path: &Path) -> Option<Self> {
        let base_name = path.file_stem()?.to_str()?.to_string();
        Some(Self {
            path: path.to_path_buf(),
            base_name,
        })
    }

    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.base_name)
    }
}

/// Closest-name hint for an invalid prefab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub component_name: String,
    pub distance: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Classification {
    /// The root object has a component whose type name equals the file name
    Valid { component_type: String },
    /// No such component. `suggestion` is absent when the asset failed to
    /// load or has no components at all.
    Invalid { suggestion: Option<Suggestion> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefabCandidate {
    pub file: PrefabFile,
    pub classification: Classification,
}

impl PrefabCandidate {
    pub fn base_name(&self) -> &str {
        &self.file.base_name
    }

    pub fn is_valid(&self) -> bool {
        matches!(self.classification, Classification::Valid { .. })
    }

    pub fn suggestion(&self) -> Option<&Suggestion> {
        match &self.classification {
            Classification::Invalid { suggestion } => suggestion.as_ref(),
            Classification::Valid { .. } => None,
        }
    }
}

/// Result of classifying every prefab under one resource path.
/// Both lists keep the order of the input files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyReport {
    pub resource_path: ResourcePath,
    pub valid: Vec<PrefabCandidate>,
    pub invalid: Vec<PrefabCandidate>,
}

impl ClassifyReport {
    pub fn new(resource_path: ResourcePath) -> Self {
        Self {
            resource_path,
            valid: Vec::new(),
            invalid: Vec::new(),
        }
    }

    pub fn push(&mut self, candidate: PrefabCandidate) {
        if candidate.is_valid() {
            self.valid.push(candidate);
        } else {
            self.invalid.push(candidate);
        }
    }

    pub fn valid_names(&self) -> impl Iterator<Item = &str> {
        self.valid.iter().map(|c| c.base_name())
    }

    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len()
    }
}
