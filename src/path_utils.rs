use std::fmt;
use std::path::{Component, Path};

use serde::Serialize;

/// Label used when the project root has to be shown to a human.
pub const ROOT_LABEL: &str = "root";

/// Project-relative path in canonical form.
///
/// Every path comparison in the engine goes through this type:
/// - forward slashes only (`\\` is converted)
/// - relative to the project root, no leading `./`
/// - no empty segments and no trailing slash
///
/// The project root itself is the empty path.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    /// Normalize a path string written by a user or found in configuration.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let joined = raw
            .split(['/', '\\'])
            .filter(|s| !s.is_empty() && *s != ".")
            .collect::<Vec<_>>()
            .join("/");
        Self(joined)
    }

    /// Normalize a location string, accepting `""`, `"."` and `"root"` as the project root.
    #[must_use]
    pub fn location(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed == ROOT_LABEL {
            return Self::default();
        }
        Self::new(trimmed)
    }

    /// Normalize a filesystem path relative to `root`.
    ///
    /// Paths outside `root` keep their own components so that they never compare
    /// equal to an in-tree path.
    #[must_use]
    pub fn from_relative(root: &Path, path: &Path) -> Self {
        let relative = path.strip_prefix(root).unwrap_or(path);
        let segments: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
                Component::ParentDir => Some("..".to_string()),
                Component::CurDir | Component::RootDir | Component::Prefix(_) => None,
            })
            .collect();
        Self(segments.join("/"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Last segment of the path (empty for the root).
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Extension of the last segment, without the dot.
    ///
    /// Follows `Path::extension`: dotfiles such as `.gitignore` have none.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        name.rfind('.')
            .filter(|&idx| idx > 0)
            .map(|idx| &name[idx + 1..])
    }

    /// Parent directory; the parent of a top-level entry is the root.
    #[must_use]
    pub fn parent(&self) -> Self {
        self.0
            .rfind('/')
            .map_or_else(Self::default, |idx| Self(self.0[..idx].to_string()))
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments().count()
    }

    /// All proper ancestors, nearest first, excluding the root.
    #[must_use]
    pub fn ancestors(&self) -> Vec<Self> {
        let mut result = Vec::new();
        let mut current = self.parent();
        while !current.is_root() {
            let next = current.parent();
            result.push(current);
            current = next;
        }
        result
    }

    /// True if `self` equals `prefix` or lies beneath it, comparing whole segments.
    ///
    /// The root prefix contains every path.
    #[must_use]
    pub fn is_within(&self, prefix: &Self) -> bool {
        if prefix.is_root() {
            return true;
        }
        self.0 == prefix.0
            || self
                .0
                .strip_prefix(prefix.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }

    #[must_use]
    pub fn join(&self, segment: &str) -> Self {
        if self.is_root() {
            Self::new(segment)
        } else {
            Self::new(&format!("{}/{segment}", self.0))
        }
    }

    /// The path as shown in location messages: the root is spelled `root`.
    #[must_use]
    pub fn display_location(&self) -> &str {
        if self.is_root() { ROOT_LABEL } else { &self.0 }
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NormalizedPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
