//! Maps script GUIDs (from `.cs.meta` files) to the script's class name.
//!
//! Unity requires a MonoBehaviour's class to be named after its file, so
//! the file stem is the component type name.

use crate::error::{ResfinderError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

static GUID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^guid:\s*([0-9a-fA-F]+)\s*$").expect("valid regex"));
static NAMESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\s*namespace\s+([A-Za-z_][A-Za-z0-9_.]*)").expect("valid regex")
});

const META_SUFFIX: &str = ".cs.meta";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptInfo {
    pub guid: String,
    pub name: String,
    pub namespace: Option<String>,
    pub path: PathBuf,
}

impl ScriptInfo {
    pub fn full_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{}.{}", ns, self.name),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ScriptIndex {
    by_guid: HashMap<String, ScriptInfo>,
}

impl ScriptIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks `assets_root` for C# scripts with meta files.
    pub fn build(assets_root: &Path) -> Result<Self> {
        let start = std::time::Instant::now();
        let mut index = Self::new();

        for entry in WalkDir::new(assets_root).sort_by_file_name() {
            let entry = entry.map_err(|e| ResfinderError::scan_failed(assets_root, e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(name) = file_name.strip_suffix(META_SUFFIX) else {
                continue;
            };

            match Self::read_script(entry.path(), name) {
                Ok(Some(info)) => index.insert(info),
                Ok(None) => debug!("No guid in {}", entry.path().display()),
                Err(e) => warn!("Failed to read {}: {}", entry.path().display(), e),
            }
        }

        info!(
            "Indexed {} scripts under {} in {:?}",
            index.len(),
            assets_root.display(),
            start.elapsed()
        );
        Ok(index)
    }

    fn read_script(meta_path: &Path, name: &str) -> std::io::Result<Option<ScriptInfo>> {
        let meta = std::fs::read_to_string(meta_path)?;
        let Some(guid) = GUID_RE.captures(&meta).map(|c| c[1].to_lowercase()) else {
            return Ok(None);
        };

        let script_path = meta_path.with_file_name(format!("{}.cs", name));
        let namespace = match std::fs::read_to_string(&script_path) {
            Ok(source) => parse_namespace(&source),
            Err(_) => None,
        };

        Ok(Some(ScriptInfo {
            guid,
            name: name.to_string(),
            namespace,
            path: script_path,
        }))
    }

    pub fn insert(&mut self, info: ScriptInfo) {
        if let Some(previous) = self.by_guid.get(&info.guid) {
            warn!(
                "Duplicate script guid {} ({} and {})",
                info.guid,
                previous.path.display(),
                info.path.display()
            );
        }
        self.by_guid.insert(info.guid.clone(), info);
    }

    pub fn get(&self, guid: &str) -> Option<&ScriptInfo> {
        self.by_guid.get(&guid.to_lowercase())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptInfo> {
        self.by_guid.values()
    }

    pub fn len(&self) -> usize {
        self.by_guid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_guid.is_empty()
    }
}

/// Whether a changed file can affect script lookups (`.cs` or `.cs.meta`).
pub fn is_script_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with(".cs") || n.ends_with(META_SUFFIX))
}

/// A `ScriptIndex` that can be swapped out while readers hold snapshots.
#[derive(Debug, Clone, Default)]
pub struct SharedScriptIndex {
    inner: Arc<RwLock<Arc<ScriptIndex>>>,
}

impl SharedScriptIndex {
    pub fn new(index: ScriptIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    pub fn snapshot(&self) -> Arc<ScriptIndex> {
        self.inner.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn replace(&self, index: ScriptIndex) {
        *self.inner.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(index);
    }
}

/// First `namespace` declaration in a C# source file, block or file-scoped.
pub fn parse_namespace(source: &str) -> Option<String> {
    NAMESPACE_RE.captures(source).map(|c| c[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_script(dir: &Path, name: &str, guid: &str, source: &str) {
        std::fs::create_dir_all(dir).unwrap();
        std::fs::write(dir.join(format!("{}.cs", name)), source).unwrap();
        std::fs::write(
            dir.join(format!("{}.cs.meta", name)),
            format!("fileFormatVersion: 2\nguid: {}\nMonoImporter:\n  serializedVersion: 2\n", guid),
        )
        .unwrap();
    }

    #[test]
    fn test_build_index() {
        let temp = TempDir::new().unwrap();
        let scripts = temp.path().join("Scripts");
        write_script(
            &scripts,
            "PlayerPanel",
            "AABBCC00112233445566778899AABBCC",
            "namespace Game.UI\n{\n    public class PlayerPanel : MonoBehaviour {}\n}\n",
        );
        write_script(
            &scripts.join("Misc"),
            "Spinner",
            "00000000000000000000000000000001",
            "using UnityEngine;\npublic class Spinner : MonoBehaviour {}\n",
        );
        std::fs::write(scripts.join("Notes.txt.meta"), "guid: ffff\n").unwrap();

        let index = ScriptIndex::build(temp.path()).unwrap();
        assert_eq!(index.len(), 2);

        let panel = index.get("aabbcc00112233445566778899aabbcc").unwrap();
        assert_eq!(panel.name, "PlayerPanel");
        assert_eq!(panel.namespace.as_deref(), Some("Game.UI"));
        assert_eq!(panel.full_name(), "Game.UI.PlayerPanel");

        let spinner = index.get("00000000000000000000000000000001").unwrap();
        assert_eq!(spinner.namespace, None);
        assert_eq!(spinner.full_name(), "Spinner");
    }

    #[test]
    fn test_meta_without_script_source() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("Orphan.cs.meta"), "guid: 1234abcd\n").unwrap();

        let index = ScriptIndex::build(temp.path()).unwrap();
        let orphan = index.get("1234ABCD").unwrap();
        assert_eq!(orphan.name, "Orphan");
        assert_eq!(orphan.namespace, None);
    }

    #[test]
    fn test_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        let err = ScriptIndex::build(&temp.path().join("Assets")).unwrap_err();
        assert!(matches!(err, ResfinderError::ScanFailed { .. }));
    }

    #[test]
    fn test_is_script_path() {
        assert!(is_script_path(Path::new("Assets/Scripts/Foo.cs")));
        assert!(is_script_path(Path::new("Assets/Scripts/Foo.cs.meta")));
        assert!(!is_script_path(Path::new("Assets/Resources/Foo.prefab")));
        assert!(!is_script_path(Path::new("Assets/Scripts/Foo.csproj")));
    }

    #[test]
    fn test_shared_index_swaps_snapshot() {
        let shared = SharedScriptIndex::new(ScriptIndex::new());
        let before = shared.snapshot();

        let mut next = ScriptIndex::new();
        next.insert(ScriptInfo {
            guid: "abcd".into(),
            name: "Foo".into(),
            namespace: None,
            path: PathBuf::from("Foo.cs"),
        });
        shared.replace(next);

        assert!(before.is_empty());
        assert_eq!(shared.snapshot().get("abcd").unwrap().name, "Foo");
        assert_eq!(shared.clone().snapshot().len(), 1);
    }

    #[test]
    fn test_parse_namespace_forms() {
        assert_eq!(parse_namespace("namespace A.B;\nclass C {}"), Some("A.B".into()));
        assert_eq!(parse_namespace("  namespace Foo {\n}"), Some("Foo".into()));
        assert_eq!(parse_namespace("class NoNamespace {}"), None);
    }
}
