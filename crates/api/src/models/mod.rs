pub mod prefab;

pub use prefab::*;
