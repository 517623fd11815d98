mod types;

pub use types::{ScanEntry, ScanStats};

use std::collections::{HashSet, VecDeque};
use std::fs;
use std::path::{Path, PathBuf};

use crate::path_utils::NormalizedPath;

/// Path segments that are never yielded, counted or descended into.
pub const IGNORED_SEGMENTS: &[&str] = &[".git"];

fn is_ignored(name: &str) -> bool {
    IGNORED_SEGMENTS.contains(&name)
}

/// Walks a project tree once and yields every file and directory beneath the root.
///
/// Traversal uses an explicit worklist instead of recursion. Directory symlinks are
/// followed, but each physical directory (by canonical path) is descended into once,
/// so symlink cycles terminate.
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectoryScanner;

impl DirectoryScanner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Lazily scan `root`. The root itself is not yielded.
    #[must_use]
    pub fn scan(&self, root: &Path) -> ScanIter {
        let mut visited = HashSet::new();
        visited.insert(canonical(root));
        ScanIter {
            root: root.to_path_buf(),
            root_listed: false,
            pending_dirs: Vec::new(),
            buffered: VecDeque::new(),
            visited,
        }
    }
}

/// Iterator returned by [`DirectoryScanner::scan`].
///
/// Children of one directory are yielded in the order the OS lists them, before any
/// of their descendants. Each directory is listed once; the listing that gives its
/// `child_count` is the one it is expanded from.
#[derive(Debug)]
pub struct ScanIter {
    root: PathBuf,
    root_listed: bool,
    /// Listings of directories still to expand.
    pending_dirs: Vec<Vec<PathBuf>>,
    buffered: VecDeque<ScanEntry>,
    visited: HashSet<PathBuf>,
}

impl Iterator for ScanIter {
    type Item = ScanEntry;

    fn next(&mut self) -> Option<ScanEntry> {
        if !self.root_listed {
            self.root_listed = true;
            self.pending_dirs.push(list_children(&self.root));
        }
        loop {
            if let Some(entry) = self.buffered.pop_front() {
                return Some(entry);
            }
            let children = self.pending_dirs.pop()?;
            self.expand(children);
        }
    }
}

impl ScanIter {
    fn expand(&mut self, children: Vec<PathBuf>) {
        let mut subdirs = Vec::new();

        for child in children {
            let (entry, listing) = self.describe(&child);
            if let Some(listing) = listing
                && self.visited.insert(canonical(&child))
            {
                subdirs.push(listing);
            }
            self.buffered.push_back(entry);
        }

        // Stack order: the first subdirectory listed is expanded first.
        self.pending_dirs.extend(subdirs.into_iter().rev());
    }

    /// Stat `path`; directories also return their listing.
    fn describe(&self, path: &Path) -> (ScanEntry, Option<Vec<PathBuf>>) {
        let normalized = NormalizedPath::from_relative(&self.root, path);

        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => {
                let listing = list_children(path);
                let entry = ScanEntry {
                    path: normalized,
                    is_dir: true,
                    size_bytes: 0,
                    child_count: listing.len(),
                };
                (entry, Some(listing))
            }
            Ok(meta) => (
                ScanEntry {
                    path: normalized,
                    is_dir: false,
                    size_bytes: meta.len(),
                    child_count: 0,
                },
                None,
            ),
            Err(e) => {
                tracing::warn!("Cannot stat {}: {e}", path.display());
                let entry = ScanEntry {
                    path: normalized,
                    is_dir: false,
                    size_bytes: 0,
                    child_count: 0,
                };
                (entry, None)
            }
        }
    }
}

/// Children of `dir` in OS order, skipping ignored segments. Unreadable directories
/// have no children.
pub(crate) fn list_children(dir: &Path) -> Vec<PathBuf> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            tracing::warn!("Cannot list {}: {e}", dir.display());
            return Vec::new();
        }
    };

    read_dir
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!("Cannot read entry in {}: {e}", dir.display());
                None
            }
        })
        .filter(|entry| !is_ignored(&entry.file_name().to_string_lossy()))
        .map(|entry| entry.path())
        .collect()
}

fn canonical(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
