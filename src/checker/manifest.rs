//! Expected-structure checking.
//!
//! Walks the manifest, not the tree: every manifest entry is looked up on disk and
//! yields exactly one [`ManifestRecord`]. Nothing here fails; access errors degrade
//! to a missing or zero-sized record.

use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{ManifestEntry, RuleSet, SizeThresholds};
use crate::path_utils::NormalizedPath;
use crate::scanner::list_children;

use super::finding::{EntryKind, Finding, FindingCategory, Severity};

/// Content verdict for one manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentStatus {
    Good,
    EmptyAllowed,
    EmptyProblematic,
    MinimalNormal,
    MinimalCritical,
    /// A directory with too few items and nothing important in it.
    Minimal,
    Missing,
}

impl ContentStatus {
    /// Present and acceptable.
    #[must_use]
    pub const fn is_found(self) -> bool {
        matches!(self, Self::Good | Self::EmptyAllowed)
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::EmptyAllowed => "empty (allowed)",
            Self::EmptyProblematic => "empty",
            Self::MinimalNormal => "minimal",
            Self::MinimalCritical => "minimal (critical)",
            Self::Minimal => "minimal",
            Self::Missing => "missing",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestRecord {
    pub path: NormalizedPath,
    pub kind: EntryKind,
    pub optional: bool,
    pub status: ContentStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_bytes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir_count: Option<usize>,
    pub has_important_files: bool,
    pub critical: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl ManifestRecord {
    fn missing(entry: &ManifestEntry, kind: EntryKind, reason: String) -> Self {
        Self {
            path: NormalizedPath::new(&entry.path),
            kind,
            optional: entry.optional,
            status: ContentStatus::Missing,
            size_bytes: None,
            item_count: None,
            file_count: None,
            dir_count: None,
            has_important_files: false,
            critical: false,
            reason: Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRecord {
    pub name: String,
    pub present: bool,
    pub item_count: usize,
    pub has_important_files: bool,
}

/// Everything the manifest walk produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestOutcome {
    pub records: Vec<ManifestRecord>,
    pub roles: Vec<RoleRecord>,
    pub findings: Vec<Finding>,
    pub directories_checked: usize,
    pub files_checked: usize,
}

#[derive(Debug, Default)]
struct DirContent {
    item_count: usize,
    file_count: usize,
    dir_count: usize,
    has_important_files: bool,
}

pub struct ExpectedStructureChecker {
    directories: Vec<ManifestEntry>,
    files: Vec<ManifestEntry>,
    roles_root: NormalizedPath,
    roles: Vec<String>,
    roles_required: bool,
    thresholds: SizeThresholds,
    ignore_empty_files: HashSet<String>,
    ignore_empty_dir_prefixes: Vec<NormalizedPath>,
    critical_files: HashSet<NormalizedPath>,
    important_extensions: HashSet<String>,
}

impl ExpectedStructureChecker {
    #[must_use]
    pub fn new(rules: &RuleSet) -> Self {
        Self {
            directories: rules.manifest.directories.clone(),
            files: rules.manifest.files.clone(),
            roles_root: NormalizedPath::location(&rules.manifest.roles_root),
            roles: rules.manifest.roles.clone(),
            roles_required: rules.manifest.roles_required,
            thresholds: rules.size_thresholds.clone(),
            ignore_empty_files: rules.ignore_empty_files.iter().cloned().collect(),
            ignore_empty_dir_prefixes: rules
                .ignore_empty_dir_prefixes
                .iter()
                .map(|p| NormalizedPath::new(p))
                .collect(),
            critical_files: rules
                .critical_files
                .iter()
                .map(|p| NormalizedPath::new(p))
                .collect(),
            important_extensions: rules
                .important_extensions
                .iter()
                .map(|ext| ext.trim_start_matches('.').to_string())
                .collect(),
        }
    }

    /// Directories first, then files, then roles.
    #[must_use]
    pub fn check(&self, root: &Path) -> ManifestOutcome {
        let mut outcome = ManifestOutcome::default();

        for entry in &self.directories {
            outcome.directories_checked += 1;
            let record = self.check_directory(root, entry);
            outcome.findings.extend(self.finding_for(&record));
            outcome.records.push(record);
        }
        for entry in &self.files {
            outcome.files_checked += 1;
            let record = self.check_file(root, entry);
            outcome.findings.extend(self.finding_for(&record));
            outcome.records.push(record);
        }
        for name in &self.roles {
            let (role, finding) = self.check_role(root, name);
            outcome.findings.extend(finding);
            outcome.roles.push(role);
        }

        outcome
    }

    fn check_directory(&self, root: &Path, entry: &ManifestEntry) -> ManifestRecord {
        let path = NormalizedPath::new(&entry.path);
        let on_disk = resolve(root, &path);

        match fs::metadata(&on_disk) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return ManifestRecord::missing(
                    entry,
                    EntryKind::Directory,
                    "Path exists but is not a directory".to_string(),
                );
            }
            Err(e) => {
                let reason = missing_reason(&e, "Directory");
                return ManifestRecord::missing(entry, EntryKind::Directory, reason);
            }
        }

        let content = self.directory_content(&on_disk);
        let status = if content.item_count == 0 {
            if self.ignore_empty_dir_prefixes.iter().any(|p| path.is_within(p)) {
                ContentStatus::EmptyAllowed
            } else {
                ContentStatus::EmptyProblematic
            }
        } else if content.item_count < self.thresholds.min_dir_items
            && !content.has_important_files
        {
            ContentStatus::Minimal
        } else {
            ContentStatus::Good
        };

        ManifestRecord {
            path,
            kind: EntryKind::Directory,
            optional: entry.optional,
            status,
            size_bytes: None,
            item_count: Some(content.item_count),
            file_count: Some(content.file_count),
            dir_count: Some(content.dir_count),
            has_important_files: content.has_important_files,
            critical: false,
            reason: None,
        }
    }

    fn check_file(&self, root: &Path, entry: &ManifestEntry) -> ManifestRecord {
        let path = NormalizedPath::new(&entry.path);

        let size = match fs::metadata(resolve(root, &path)) {
            Ok(meta) if meta.is_file() => meta.len(),
            Ok(_) => {
                return ManifestRecord::missing(
                    entry,
                    EntryKind::File,
                    "Path exists but is not a file".to_string(),
                );
            }
            Err(e) => {
                let reason = missing_reason(&e, "File");
                return ManifestRecord::missing(entry, EntryKind::File, reason);
            }
        };

        let critical = self.critical_files.contains(&path);
        let status = if size == 0 {
            if self.ignore_empty_files.contains(path.file_name()) {
                ContentStatus::EmptyAllowed
            } else {
                ContentStatus::EmptyProblematic
            }
        } else if critical && size < self.thresholds.min_critical_file_bytes {
            ContentStatus::MinimalCritical
        } else if size < self.thresholds.min_file_bytes {
            ContentStatus::MinimalNormal
        } else {
            ContentStatus::Good
        };

        ManifestRecord {
            path,
            kind: EntryKind::File,
            optional: entry.optional,
            status,
            size_bytes: Some(size),
            item_count: None,
            file_count: None,
            dir_count: None,
            has_important_files: false,
            critical,
            reason: None,
        }
    }

    fn check_role(&self, root: &Path, name: &str) -> (RoleRecord, Option<Finding>) {
        let path = self.roles_root.join(name);
        let on_disk = resolve(root, &path);

        if fs::metadata(&on_disk).is_ok_and(|meta| meta.is_dir()) {
            let content = self.directory_content(&on_disk);
            let role = RoleRecord {
                name: name.to_string(),
                present: true,
                item_count: content.item_count,
                has_important_files: content.has_important_files,
            };
            return (role, None);
        }

        let role = RoleRecord {
            name: name.to_string(),
            present: false,
            item_count: 0,
            has_important_files: false,
        };
        let optional = !self.roles_required;
        let finding = Finding::new(
            path,
            EntryKind::Directory,
            FindingCategory::Missing,
            missing_severity(optional),
            format!("Role '{name}' does not exist"),
        )
        .with_optional(optional);
        (role, Some(finding))
    }

    fn directory_content(&self, dir: &Path) -> DirContent {
        let mut content = DirContent::default();
        for child in list_children(dir) {
            content.item_count += 1;
            match fs::metadata(&child) {
                Ok(meta) if meta.is_dir() => content.dir_count += 1,
                Ok(_) => {
                    content.file_count += 1;
                    content.has_important_files |= child.extension().is_some_and(|ext| {
                        self.important_extensions
                            .contains(ext.to_string_lossy().as_ref())
                    });
                }
                Err(e) => tracing::warn!("Cannot stat {}: {e}", child.display()),
            }
        }
        content
    }

    fn finding_for(&self, record: &ManifestRecord) -> Option<Finding> {
        let (category, severity, reason) = match record.status {
            ContentStatus::Good | ContentStatus::EmptyAllowed => return None,
            ContentStatus::Missing => (
                FindingCategory::Missing,
                missing_severity(record.optional),
                record.reason.clone().unwrap_or_default(),
            ),
            ContentStatus::EmptyProblematic => {
                let what = match record.kind {
                    EntryKind::File => "File",
                    EntryKind::Directory => "Directory",
                };
                (FindingCategory::Empty, Severity::Error, format!("{what} is empty"))
            }
            ContentStatus::MinimalCritical => (
                FindingCategory::Minimal,
                Severity::Error,
                format!(
                    "Critical file has {} bytes, expected at least {}",
                    record.size_bytes.unwrap_or_default(),
                    self.thresholds.min_critical_file_bytes
                ),
            ),
            ContentStatus::MinimalNormal => (
                FindingCategory::Minimal,
                Severity::Warning,
                format!(
                    "File has {} bytes, expected at least {}",
                    record.size_bytes.unwrap_or_default(),
                    self.thresholds.min_file_bytes
                ),
            ),
            ContentStatus::Minimal => (
                FindingCategory::Minimal,
                Severity::Warning,
                format!(
                    "Directory has {} items and no important files",
                    record.item_count.unwrap_or_default()
                ),
            ),
        };

        Some(
            Finding::new(record.path.clone(), record.kind, category, severity, reason)
                .with_optional(record.optional)
                .with_critical(record.status == ContentStatus::MinimalCritical),
        )
    }
}

const fn missing_severity(optional: bool) -> Severity {
    if optional { Severity::Info } else { Severity::Error }
}

fn missing_reason(error: &std::io::Error, what: &str) -> String {
    if error.kind() == ErrorKind::NotFound {
        format!("{what} does not exist")
    } else {
        tracing::warn!("Cannot access manifest entry: {error}");
        format!("{what} cannot be accessed: {error}")
    }
}

fn resolve(root: &Path, path: &NormalizedPath) -> PathBuf {
    path.segments().fold(root.to_path_buf(), |acc, segment| acc.join(segment))
}

#[cfg(test)]
#[path = "manifest_tests.rs"]
mod tests;
