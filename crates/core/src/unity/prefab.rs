//! Minimal reader for text-serialized Unity prefabs.
//!
//! Only the fields needed to find the root object's components are read:
//! document headers, `m_Component`, `m_GameObject`, `m_Father` and
//! `m_Script`.

use super::BUILTIN_NAMESPACE;
use super::script_index::ScriptIndex;
use once_cell::sync::Lazy;
use regex::Regex;
use resfinder_api::ComponentDescriptor;
use thiserror::Error;
use tracing::debug;

static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^--- !u!(-?\d+) &(-?\d+)(\s+stripped)?").expect("valid regex"));
static TYPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*):\s*$").expect("valid regex"));
static GAME_OBJECT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^  m_GameObject: \{fileID: (-?\d+)").expect("valid regex"));
static FATHER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^  m_Father: \{fileID: (-?\d+)").expect("valid regex"));
static COMPONENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^  - component: \{fileID: (-?\d+)").expect("valid regex"));
static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^  m_Script: \{fileID: -?\d+, guid: ([0-9a-fA-F]+)").expect("valid regex")
});

const CLASS_GAME_OBJECT: i32 = 1;
const MONO_BEHAVIOUR: &str = "MonoBehaviour";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrefabParseError {
    #[error("not a text-serialized Unity asset")]
    NotUnityYaml,
    #[error("no root game object found")]
    NoRootObject,
}

/// One `--- !u!<class> &<id>` document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnityDocument {
    pub class_id: i32,
    pub file_id: i64,
    pub type_name: String,
    pub stripped: bool,
    pub game_object: Option<i64>,
    pub father: Option<i64>,
    pub script_guid: Option<String>,
    /// `m_Component` entries of a GameObject document, in order
    pub components: Vec<i64>,
}

impl UnityDocument {
    fn is_transform(&self) -> bool {
        self.type_name == "Transform" || self.type_name == "RectTransform"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPrefab {
    pub documents: Vec<UnityDocument>,
    pub root_object: i64,
}

impl ParsedPrefab {
    pub fn parse(text: &str) -> Result<Self, PrefabParseError> {
        let documents = parse_documents(text);
        if documents.is_empty() {
            return Err(PrefabParseError::NotUnityYaml);
        }
        let root_object = find_root_object(&documents).ok_or(PrefabParseError::NoRootObject)?;
        Ok(Self {
            documents,
            root_object,
        })
    }

    /// Documents attached to the root object, in `m_Component` order when
    /// the root lists its components, otherwise in file order.
    pub fn root_components(&self) -> Vec<&UnityDocument> {
        let attached = |d: &&UnityDocument| {
            d.class_id != CLASS_GAME_OBJECT && d.game_object == Some(self.root_object)
        };

        let listed = self
            .documents
            .iter()
            .find(|d| d.class_id == CLASS_GAME_OBJECT && d.file_id == self.root_object)
            .map(|go| go.components.as_slice())
            .unwrap_or_default();

        if listed.is_empty() {
            return self.documents.iter().filter(attached).collect();
        }

        listed
            .iter()
            .filter_map(|id| self.documents.iter().find(|d| d.file_id == *id))
            .filter(attached)
            .collect()
    }

    /// Root components as descriptors. Scripts are named through `scripts`;
    /// scripts missing from the index are skipped.
    pub fn component_descriptors(&self, scripts: &ScriptIndex) -> Vec<ComponentDescriptor> {
        self.root_components()
            .into_iter()
            .filter_map(|doc| {
                if doc.type_name != MONO_BEHAVIOUR {
                    return Some(
                        ComponentDescriptor::new(doc.type_name.clone())
                            .with_namespace(BUILTIN_NAMESPACE),
                    );
                }

                let guid = doc.script_guid.as_deref()?;
                let Some(script) = scripts.get(guid) else {
                    debug!("Missing script {} on component &{}", guid, doc.file_id);
                    return None;
                };
                let descriptor = ComponentDescriptor::new(script.name.clone());
                Some(match &script.namespace {
                    Some(ns) => descriptor.with_namespace(ns.clone()),
                    None => descriptor,
                })
            })
            .collect()
    }
}

fn parse_documents(text: &str) -> Vec<UnityDocument> {
    let mut documents = Vec::new();
    let mut current: Option<UnityDocument> = None;

    for line in text.lines() {
        if let Some(caps) = HEADER_RE.captures(line) {
            documents.extend(current.take());
            current = Some(UnityDocument {
                class_id: caps[1].parse().unwrap_or_default(),
                file_id: caps[2].parse().unwrap_or_default(),
                stripped: caps.get(3).is_some(),
                ..Default::default()
            });
            continue;
        }

        let Some(doc) = current.as_mut() else {
            continue;
        };

        if doc.type_name.is_empty() {
            if let Some(caps) = TYPE_RE.captures(line) {
                doc.type_name = caps[1].to_string();
            }
        } else if let Some(caps) = GAME_OBJECT_RE.captures(line) {
            doc.game_object = caps[1].parse().ok();
        } else if let Some(caps) = FATHER_RE.captures(line) {
            doc.father = caps[1].parse().ok();
        } else if let Some(caps) = COMPONENT_RE.captures(line) {
            if let Ok(id) = caps[1].parse() {
                doc.components.push(id);
            }
        } else if let Some(caps) = SCRIPT_RE.captures(line) {
            doc.script_guid = Some(caps[1].to_lowercase());
        }
    }
    documents.extend(current);
    documents
}

fn find_root_object(documents: &[UnityDocument]) -> Option<i64> {
    documents
        .iter()
        .find(|d| d.is_transform() && !d.stripped && d.father == Some(0))
        .and_then(|d| d.game_object)
        .or_else(|| {
            documents
                .iter()
                .find(|d| d.class_id == CLASS_GAME_OBJECT && !d.stripped)
                .map(|d| d.file_id)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unity::ScriptInfo;
    use std::path::PathBuf;

    const PANEL: &str = "%YAML 1.1
%TAG !u! tag:unity3d.com,2011:
--- !u!1 &100
GameObject:
  m_ObjectHideFlags: 0
  serializedVersion: 6
  m_Component:
  - component: {fileID: 400}
  - component: {fileID: 1140}
  - component: {fileID: 1141}
  m_Layer: 5
  m_Name: PlayerPanel
--- !u!1 &101
GameObject:
  m_Component:
  - component: {fileID: 401}
  m_Name: Child
--- !u!224 &400
RectTransform:
  m_GameObject: {fileID: 100}
  m_Children:
  - {fileID: 401}
  m_Father: {fileID: 0}
--- !u!224 &401
RectTransform:
  m_GameObject: {fileID: 101}
  m_Father: {fileID: 400}
--- !u!114 &1141
MonoBehaviour:
  m_GameObject: {fileID: 100}
  m_Enabled: 1
  m_Script: {fileID: 11500000, guid: 0000000000000000000000000000dead, type: 3}
--- !u!114 &1140
MonoBehaviour:
  m_GameObject: {fileID: 100}
  m_Enabled: 1
  m_Script: {fileID: 11500000, guid: AAAA0000000000000000000000000001, type: 3}
  m_Title: hello
--- !u!114 &1142
MonoBehaviour:
  m_GameObject: {fileID: 101}
  m_Script: {fileID: 11500000, guid: aaaa0000000000000000000000000002, type: 3}
";

    fn scripts() -> ScriptIndex {
        let mut index = ScriptIndex::new();
        index.insert(ScriptInfo {
            guid: "aaaa0000000000000000000000000001".into(),
            name: "PlayerPanel".into(),
            namespace: Some("Game.UI".into()),
            path: PathBuf::from("Assets/Scripts/PlayerPanel.cs"),
        });
        index.insert(ScriptInfo {
            guid: "aaaa0000000000000000000000000002".into(),
            name: "ChildWidget".into(),
            namespace: None,
            path: PathBuf::from("Assets/Scripts/ChildWidget.cs"),
        });
        index
    }

    #[test]
    fn test_parse_documents() {
        let prefab = ParsedPrefab::parse(PANEL).unwrap();
        assert_eq!(prefab.documents.len(), 7);
        assert_eq!(prefab.root_object, 100);

        let go = &prefab.documents[0];
        assert_eq!(go.type_name, "GameObject");
        assert_eq!(go.components, vec![400, 1140, 1141]);
    }

    #[test]
    fn test_root_components_follow_component_list() {
        let prefab = ParsedPrefab::parse(PANEL).unwrap();
        let ids: Vec<i64> = prefab.root_components().iter().map(|d| d.file_id).collect();
        assert_eq!(ids, vec![400, 1140, 1141]);
    }

    #[test]
    fn test_descriptors_resolve_scripts_and_skip_missing() {
        let prefab = ParsedPrefab::parse(PANEL).unwrap();
        let components = prefab.component_descriptors(&scripts());
        assert_eq!(
            components,
            vec![
                ComponentDescriptor::new("RectTransform").with_namespace("UnityEngine"),
                ComponentDescriptor::new("PlayerPanel").with_namespace("Game.UI"),
            ]
        );
    }

    #[test]
    fn test_fallback_to_first_game_object() {
        let text = "--- !u!1 &7\nGameObject:\n  m_Name: Lone\n--- !u!114 &8\nMonoBehaviour:\n  m_GameObject: {fileID: 7}\n  m_Script: {fileID: 11500000, guid: aaaa0000000000000000000000000002, type: 3}\n";
        let prefab = ParsedPrefab::parse(text).unwrap();
        assert_eq!(prefab.root_object, 7);
        let components = prefab.component_descriptors(&scripts());
        assert_eq!(components, vec![ComponentDescriptor::new("ChildWidget")]);
    }

    #[test]
    fn test_rejects_non_yaml() {
        assert_eq!(
            ParsedPrefab::parse("\u{0}\u{1}binary"),
            Err(PrefabParseError::NotUnityYaml)
        );
    }

    #[test]
    fn test_no_root_object() {
        let text = "--- !u!1001 &5\nPrefabInstance:\n  m_ObjectHideFlags: 0\n";
        assert_eq!(
            ParsedPrefab::parse(text),
            Err(PrefabParseError::NoRootObject)
        );
    }
}
