//! Unity project backend: script lookup, prefab parsing and loading.
//!
//! ```text
//! ┌──────────────┐   guid → script   ┌───────────────────┐
//! │ ScriptIndex  │──────────────────▶│  prefab::parse    │
//! │ (*.cs.meta)  │                   │  (YAML documents) │
//! └──────────────┘                   └─────────┬─────────┘
//!                                              │
//!                                              ▼
//!                                  ┌──────────────────────┐
//!                                  │  ProjectAssetLoader  │
//!                                  │  (AssetLoader impl)  │
//!                                  └──────────────────────┘
//! ```

pub mod loader;
pub mod prefab;
pub mod script_index;

pub use loader::ProjectAssetLoader;
pub use prefab::{ParsedPrefab, PrefabParseError};
pub use script_index::{ScriptIndex, ScriptInfo, SharedScriptIndex, is_script_path};

/// Namespace reported for engine built-in components.
pub const BUILTIN_NAMESPACE: &str = "UnityEngine";
