//! Prefab discovery and validation.
//!
//! A prefab is usable when its root object carries a component whose type
//! name equals the prefab's file name. Everything else is reported as
//! unusable, with the closest component name as a hint.

pub mod classifier;
pub mod distance;

pub use classifier::{PrefabClassifier, ValidPrefab};
pub use distance::levenshtein;
