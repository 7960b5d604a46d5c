//! Memoized lookups shared across classification requests.

pub mod path_cache;

pub use path_cache::PathCache;
