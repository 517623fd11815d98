//! Runs the checkers over one tree and aggregates their results.

use std::path::Path;

use crate::checker::{AntiPatternDetector, Classifier, ExpectedStructureChecker, ManifestOutcome};
use crate::config::RuleSet;
use crate::output::ScanProgress;
use crate::report::{Report, ReportAggregator, ValidationMode};
use crate::scanner::{DirectoryScanner, ScanStats};

/// Scan, classify, detect anti-patterns and walk the manifest.
#[must_use]
pub fn run_full_validation(root: &Path, rules: &RuleSet) -> Report {
    Validator::new(rules).run(root, ValidationMode::Full)
}

/// Same as [`run_full_validation`] without the manifest walk.
#[must_use]
pub fn run_violations_only(root: &Path, rules: &RuleSet) -> Report {
    Validator::new(rules).run(root, ValidationMode::ViolationsOnly)
}

/// One validation pass. Every component gets the same read-only rule set and
/// returns its own result; the aggregator merges them at the end.
pub struct Validator<'a> {
    rules: &'a RuleSet,
    progress: ScanProgress,
}

impl<'a> Validator<'a> {
    #[must_use]
    pub fn new(rules: &'a RuleSet) -> Self {
        Self {
            rules,
            progress: ScanProgress::hidden(),
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: ScanProgress) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn run(&self, root: &Path, mode: ValidationMode) -> Report {
        if !root.is_dir() {
            tracing::warn!("Project root {} is not a readable directory", root.display());
        }

        let classifier = Classifier::new(self.rules);
        let mut stats = ScanStats::default();
        let mut entries = Vec::new();
        let mut findings = Vec::new();

        for entry in DirectoryScanner::new().scan(root) {
            self.progress.inc();
            stats.record(&entry);
            findings.extend(classifier.classify(&entry));
            entries.push(entry);
        }
        self.progress.finish();
        tracing::info!(
            files = stats.files_scanned,
            directories = stats.directories_scanned,
            "Scanned {}",
            root.display()
        );

        let anti_patterns = AntiPatternDetector::new(self.rules).detect(&entries);
        let manifest = match mode {
            ValidationMode::Full => ExpectedStructureChecker::new(self.rules).check(root),
            ValidationMode::ViolationsOnly => ManifestOutcome::default(),
        };
        tracing::debug!(
            findings = findings.len() + manifest.findings.len(),
            anti_patterns = anti_patterns.len(),
            "Checks complete"
        );

        ReportAggregator::new(root.display().to_string(), mode).aggregate(
            findings,
            anti_patterns,
            manifest,
            stats,
        )
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
