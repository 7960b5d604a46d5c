#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Throwaway Unity project on disk.
pub struct UnityFixture {
    pub temp: TempDir,
    next_guid: u32,
}

impl UnityFixture {
    pub fn new() -> Self {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("Assets")).unwrap();
        Self { temp, next_guid: 1 }
    }

    pub fn root(&self) -> &Path {
        self.temp.path()
    }

    pub fn assets(&self) -> PathBuf {
        self.root().join("Assets")
    }

    /// Writes `Assets/Scripts/<name>.cs` and its meta file; returns the guid.
    pub fn script(&mut self, name: &str, namespace: Option<&str>) -> String {
        let guid = format!("{:032x}", self.next_guid);
        self.next_guid += 1;

        let dir = self.assets().join("Scripts");
        std::fs::create_dir_all(&dir).unwrap();
        let body = format!("public class {} : UnityEngine.MonoBehaviour {{}}\n", name);
        let source = match namespace {
            Some(ns) => format!("namespace {}\n{{\n{}}}\n", ns, body),
            None => body,
        };
        std::fs::write(dir.join(format!("{}.cs", name)), source).unwrap();
        std::fs::write(
            dir.join(format!("{}.cs.meta", name)),
            format!("fileFormatVersion: 2\nguid: {}\n", guid),
        )
        .unwrap();
        guid
    }

    /// Writes a prefab whose root object has a Transform plus one
    /// MonoBehaviour per guid in `script_guids`.
    pub fn prefab(&self, resources_dir: &str, name: &str, script_guids: &[&str]) -> PathBuf {
        let dir = self.assets().join(resources_dir);
        std::fs::create_dir_all(&dir).unwrap();

        let mut text = String::from("%YAML 1.1\n%TAG !u! tag:unity3d.com,2011:\n");
        text.push_str("--- !u!1 &1000\nGameObject:\n  serializedVersion: 6\n  m_Component:\n");
        text.push_str("  - component: {fileID: 4000}\n");
        for i in 0..script_guids.len() {
            text.push_str(&format!("  - component: {{fileID: {}}}\n", 11400 + i));
        }
        text.push_str(&format!("  m_Name: {}\n", name));
        text.push_str(
            "--- !u!4 &4000\nTransform:\n  m_GameObject: {fileID: 1000}\n  m_Children: []\n  m_Father: {fileID: 0}\n",
        );
        for (i, guid) in script_guids.iter().enumerate() {
            text.push_str(&format!(
                "--- !u!114 &{}\nMonoBehaviour:\n  m_GameObject: {{fileID: 1000}}\n  m_Enabled: 1\n  m_Script: {{fileID: 11500000, guid: {}, type: 3}}\n",
                11400 + i,
                guid
            ));
        }

        let path = dir.join(format!("{}.prefab", name));
        std::fs::write(&path, text).unwrap();
        path
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }
}
