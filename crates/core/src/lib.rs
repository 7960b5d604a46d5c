pub mod binding;
pub mod cache;
pub mod classify;
pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod picker;
pub mod project;
pub mod registry;
pub mod unity;
pub mod watch;

pub use binding::ResourceBinding;
pub use cache::PathCache;
pub use classify::{PrefabClassifier, ValidPrefab, levenshtein};
pub use config::ResfinderConfig;
pub use error::{ResfinderError, Result};
pub use picker::{PickerStatus, PickerView, SelectionEvent};
pub use project::Project;
pub use registry::{TypeEntry, TypeRegistry};
