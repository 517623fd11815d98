use std::collections::BTreeMap;

use serde::Serialize;

use crate::checker::{
    AntiPattern, Finding, FindingCategory, ManifestOutcome, ManifestRecord, RoleRecord, Severity,
};
use crate::scanner::ScanStats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationMode {
    Full,
    /// Tree checks and anti-patterns only; the manifest walk is skipped.
    ViolationsOnly,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Statistics {
    pub directories_scanned: usize,
    pub files_scanned: usize,
    pub total_size_bytes: u64,
    pub manifest_directories_checked: usize,
    pub manifest_files_checked: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub forbidden: usize,
    pub misplaced: usize,
    pub naming_violations: usize,
    pub missing_required: usize,
    pub missing_optional: usize,
    pub empty_problematic: usize,
    pub minimal_critical: usize,
    pub minimal_normal: usize,
    /// Manifest entries that are present and acceptable.
    pub found: usize,
    pub anti_pattern_errors: usize,
    pub anti_pattern_warnings: usize,
    pub anti_pattern_info: usize,
    pub total_violations: usize,
    pub passed: bool,
}

/// Immutable result of one validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub root: String,
    pub mode: ValidationMode,
    pub statistics: Statistics,
    /// Every category is present, each list sorted by path.
    pub findings: BTreeMap<FindingCategory, Vec<Finding>>,
    pub manifest: Vec<ManifestRecord>,
    pub roles: Vec<RoleRecord>,
    pub anti_patterns: Vec<AntiPattern>,
    pub summary: Summary,
}

impl Report {
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.summary.passed
    }

    #[must_use]
    pub fn findings_in(&self, category: FindingCategory) -> &[Finding] {
        self.findings
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn all_findings(&self) -> impl Iterator<Item = &Finding> {
        self.findings.values().flatten()
    }
}

/// Merges the outputs of the checkers into a [`Report`].
///
/// Nothing is deduplicated: a path may appear once per category.
#[derive(Debug, Clone)]
pub struct ReportAggregator {
    root: String,
    mode: ValidationMode,
}

impl ReportAggregator {
    #[must_use]
    pub fn new(root: impl Into<String>, mode: ValidationMode) -> Self {
        Self {
            root: root.into(),
            mode,
        }
    }

    #[must_use]
    pub fn aggregate(
        self,
        classifier_findings: Vec<Finding>,
        anti_patterns: Vec<AntiPattern>,
        manifest: ManifestOutcome,
        scan_stats: ScanStats,
    ) -> Report {
        let mut findings: BTreeMap<FindingCategory, Vec<Finding>> = FindingCategory::ALL
            .into_iter()
            .map(|category| (category, Vec::new()))
            .collect();
        for finding in classifier_findings.into_iter().chain(manifest.findings) {
            findings.entry(finding.category).or_default().push(finding);
        }
        for bucket in findings.values_mut() {
            bucket.sort_by(|a, b| a.path.cmp(&b.path));
        }

        let statistics = Statistics {
            directories_scanned: scan_stats.directories_scanned,
            files_scanned: scan_stats.files_scanned,
            total_size_bytes: scan_stats.total_size_bytes,
            manifest_directories_checked: manifest.directories_checked,
            manifest_files_checked: manifest.files_checked,
        };
        let summary = summarize(&findings, &anti_patterns, &manifest.records);

        Report {
            root: self.root,
            mode: self.mode,
            statistics,
            findings,
            manifest: manifest.records,
            roles: manifest.roles,
            anti_patterns,
            summary,
        }
    }
}

fn summarize(
    findings: &BTreeMap<FindingCategory, Vec<Finding>>,
    anti_patterns: &[AntiPattern],
    records: &[ManifestRecord],
) -> Summary {
    let bucket = |category: FindingCategory| {
        findings
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    };
    let count_anti = |severity: Severity| {
        anti_patterns
            .iter()
            .filter(|a| a.severity == severity)
            .count()
    };

    let missing = bucket(FindingCategory::Missing);
    let minimal = bucket(FindingCategory::Minimal);

    let mut summary = Summary {
        forbidden: bucket(FindingCategory::Forbidden).len(),
        misplaced: bucket(FindingCategory::Misplaced).len(),
        naming_violations: bucket(FindingCategory::NamingViolation).len(),
        missing_required: missing.iter().filter(|f| !f.optional).count(),
        missing_optional: missing.iter().filter(|f| f.optional).count(),
        empty_problematic: bucket(FindingCategory::Empty).len(),
        minimal_critical: minimal.iter().filter(|f| f.is_minimal_critical()).count(),
        minimal_normal: minimal.iter().filter(|f| !f.is_minimal_critical()).count(),
        found: records.iter().filter(|r| r.status.is_found()).count(),
        anti_pattern_errors: count_anti(Severity::Error),
        anti_pattern_warnings: count_anti(Severity::Warning),
        anti_pattern_info: count_anti(Severity::Info),
        total_violations: 0,
        passed: false,
    };

    summary.total_violations = summary.forbidden
        + summary.misplaced
        + summary.naming_violations
        + summary.missing_required
        + summary.empty_problematic
        + summary.minimal_critical
        + summary.anti_pattern_errors;
    summary.passed = summary.total_violations == 0;
    summary
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
