use crate::error::{ResfinderError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Per-project config file, looked up in the project root.
pub const CONFIG_FILE_NAME: &str = ".resfinder.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResfinderConfig {
    /// Folder (relative to the project root) that is scanned for resources
    pub assets_dir: PathBuf,
    /// Name of the folders that assets are loaded from
    pub sentinel: String,
    /// Prefab file extension, without the dot
    pub prefab_extension: String,
}

impl Default for ResfinderConfig {
    fn default() -> Self {
        Self {
            assets_dir: PathBuf::from("Assets"),
            sentinel: "Resources".to_string(),
            prefab_extension: "prefab".to_string(),
        }
    }
}

impl ResfinderConfig {
    /// Reads `<project_root>/.resfinder.json`, falling back to defaults when
    /// the file does not exist.
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sentinel.trim().is_empty() {
            return Err(ResfinderError::Config(
                "sentinel folder name must not be empty".to_string(),
            ));
        }
        if self.sentinel.contains(['/', '\\']) {
            return Err(ResfinderError::Config(format!(
                "sentinel folder name must be a single segment, got '{}'",
                self.sentinel
            )));
        }
        if self.prefab_extension.is_empty() || self.prefab_extension.starts_with('.') {
            return Err(ResfinderError::Config(format!(
                "prefab extension must be non-empty and have no leading dot, got '{}'",
                self.prefab_extension
            )));
        }
        Ok(())
    }

    /// Absolute (or project-relative) folder that gets scanned.
    pub fn assets_root(&self, project_root: &Path) -> PathBuf {
        project_root.join(&self.assets_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_without_file() {
        let temp = TempDir::new().unwrap();
        let config = ResfinderConfig::load(temp.path()).unwrap();
        assert_eq!(config, ResfinderConfig::default());
        assert_eq!(config.assets_root(temp.path()), temp.path().join("Assets"));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{ "sentinel": "Res" }"#,
        )
        .unwrap();

        let config = ResfinderConfig::load(temp.path()).unwrap();
        assert_eq!(config.sentinel, "Res");
        assert_eq!(config.prefab_extension, "prefab");
        assert_eq!(config.assets_dir, PathBuf::from("Assets"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            r#"{ "prefab_extension": ".prefab" }"#,
        )
        .unwrap();

        let err = ResfinderConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, ResfinderError::Config(_)));
    }

    #[test]
    fn test_malformed_json() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(CONFIG_FILE_NAME), "{ nope").unwrap();
        let err = ResfinderConfig::load(temp.path()).unwrap_err();
        assert!(matches!(err, ResfinderError::Json(_)));
    }
}
