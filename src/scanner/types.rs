use serde::Serialize;

use crate::path_utils::NormalizedPath;

/// One filesystem object seen during a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEntry {
    pub path: NormalizedPath,
    pub is_dir: bool,
    /// File size in bytes (0 for directories and unreadable entries).
    pub size_bytes: u64,
    /// Immediate children of a directory, excluding ignored segments (0 for files).
    pub child_count: usize,
}

impl ScanEntry {
    #[must_use]
    pub fn file(path: &str, size_bytes: u64) -> Self {
        Self {
            path: NormalizedPath::new(path),
            is_dir: false,
            size_bytes,
            child_count: 0,
        }
    }

    #[must_use]
    pub fn directory(path: &str, child_count: usize) -> Self {
        Self {
            path: NormalizedPath::new(path),
            is_dir: true,
            size_bytes: 0,
            child_count,
        }
    }
}

/// Totals over every scanned entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanStats {
    pub directories_scanned: usize,
    pub files_scanned: usize,
    pub total_size_bytes: u64,
}

impl ScanStats {
    pub const fn record(&mut self, entry: &ScanEntry) {
        if entry.is_dir {
            self.directories_scanned += 1;
        } else {
            self.files_scanned += 1;
            self.total_size_bytes += entry.size_bytes;
        }
    }
}
