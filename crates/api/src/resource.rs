use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A relative folder path below a resources folder, e.g. `ui/panels`.
///
/// Stored as an ordered list of case-sensitive segments. Both `/` and `\`
/// are accepted as separators when parsing; empty and `.` segments are
/// dropped so `"ui//panels/"` and `"ui/panels"` are the same key. `..` is
/// dropped as well, so a resource path never leaves its resources folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    pub fn new(raw: &str) -> Self {
        let segments = raw
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .map(str::to_string)
            .collect();
        Self { segments }
    }

    /// The empty path, which addresses the resources folders themselves.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends the segments to `base` as nested directories.
    pub fn join_onto(&self, base: &Path) -> PathBuf {
        let mut out = base.to_path_buf();
        for seg in &self.segments {
            out.push(seg);
        }
        out
    }

    /// Returns true if `path` contains `sentinel` immediately followed by all
    /// of this path's segments, compared component by component.
    pub fn is_under_sentinel(&self, path: &Path, sentinel: &str) -> bool {
        let components: Vec<&str> = path
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .flat_map(|s| s.split('\\'))
            .collect();

        let needle_len = self.segments.len() + 1;
        if components.len() < needle_len {
            return false;
        }

        components.windows(needle_len).any(|window| {
            window[0] == sentinel
                && window[1..]
                    .iter()
                    .zip(&self.segments)
                    .all(|(have, want)| *have == want.as_str())
        })
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

impl From<&str> for ResourcePath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ResourcePath {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<ResourcePath> for String {
    fn from(path: ResourcePath) -> Self {
        path.to_string()
    }
}
