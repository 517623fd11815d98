use serde::Serialize;

use crate::path_utils::NormalizedPath;

/// What kind of problem a finding reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    Forbidden,
    Misplaced,
    NamingViolation,
    Missing,
    Empty,
    Minimal,
}

impl FindingCategory {
    pub const ALL: [Self; 6] = [
        Self::Forbidden,
        Self::Misplaced,
        Self::NamingViolation,
        Self::Missing,
        Self::Empty,
        Self::Minimal,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Forbidden => "forbidden",
            Self::Misplaced => "misplaced",
            Self::NamingViolation => "naming violation",
            Self::Missing => "missing",
            Self::Empty => "empty",
            Self::Minimal => "minimal",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl Severity {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    #[must_use]
    pub const fn from_is_dir(is_dir: bool) -> Self {
        if is_dir { Self::Directory } else { Self::File }
    }
}

/// One classified problem for one path.
///
/// A path may carry several findings, one per independent check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub path: NormalizedPath,
    pub kind: EntryKind,
    pub category: FindingCategory,
    pub severity: Severity,
    pub reason: String,
    pub optional: bool,
    /// Set on `Minimal` findings for critical files.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub critical: bool,
}

impl Finding {
    #[must_use]
    pub fn new(
        path: NormalizedPath,
        kind: EntryKind,
        category: FindingCategory,
        severity: Severity,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            path,
            kind,
            category,
            severity,
            reason: reason.into(),
            optional: false,
            critical: false,
        }
    }

    #[must_use]
    pub const fn with_optional(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    #[must_use]
    pub const fn with_critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    /// True for a `Minimal` finding on a critical file.
    #[must_use]
    pub const fn is_minimal_critical(&self) -> bool {
        matches!(self.category, FindingCategory::Minimal) && self.critical
    }
}
