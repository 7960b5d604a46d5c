pub mod asset;
pub mod models;
pub mod resource;

// Re-export commonly used types
pub use asset::{AssetLoader, ComponentDescriptor, DirectoryLister, LoadedAsset};
pub use models::*;
pub use resource::ResourcePath;
