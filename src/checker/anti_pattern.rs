use serde::Serialize;

use crate::config::RuleSet;
use crate::path_utils::NormalizedPath;
use crate::scanner::ScanEntry;

use super::finding::Severity;
use super::patterns::PatternSet;

/// Number of offending paths quoted in a deep-nesting message.
const DEEP_NESTING_EXAMPLES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AntiPatternKind {
    DuplicateMarkers,
    DisallowedRootFiles,
    ScatteredConfigs,
    DeepNesting,
    EmptyCriticalDir,
}

/// A whole-tree heuristic violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AntiPattern {
    #[serde(rename = "type")]
    pub kind: AntiPatternKind,
    pub severity: Severity,
    pub message: String,
    /// Every offending path, sorted.
    pub paths: Vec<NormalizedPath>,
}

impl AntiPattern {
    fn new(
        kind: AntiPatternKind,
        severity: Severity,
        message: String,
        paths: Vec<NormalizedPath>,
    ) -> Self {
        Self {
            kind,
            severity,
            message,
            paths,
        }
    }
}

/// Runs the heuristics that need the full entry list.
pub struct AntiPatternDetector {
    marker_pattern: String,
    marker: PatternSet,
    root_disallowed: PatternSet,
    config_patterns: PatternSet,
    /// Only named in the scattered-config message; the check itself looks at root files.
    config_dir: NormalizedPath,
    root_config_exceptions: Vec<String>,
    max_depth: usize,
    critical_dirs: Vec<NormalizedPath>,
}

impl AntiPatternDetector {
    #[must_use]
    pub fn new(rules: &RuleSet) -> Self {
        let config = &rules.anti_patterns;
        Self {
            marker_pattern: config.marker_pattern.clone(),
            marker: PatternSet::new(std::slice::from_ref(&config.marker_pattern)),
            root_disallowed: PatternSet::new(&config.root_disallowed),
            config_patterns: PatternSet::new(&config.config_patterns),
            config_dir: NormalizedPath::location(&config.config_dir),
            root_config_exceptions: config.root_config_exceptions.clone(),
            max_depth: config.max_depth,
            critical_dirs: config
                .critical_dirs
                .iter()
                .map(|p| NormalizedPath::new(p))
                .collect(),
        }
    }

    #[must_use]
    pub fn detect(&self, entries: &[ScanEntry]) -> Vec<AntiPattern> {
        let mut found = Vec::new();
        found.extend(self.duplicate_markers(entries));
        found.extend(self.disallowed_root_files(entries));
        found.extend(self.scattered_configs(entries));
        found.extend(self.deep_nesting(entries));
        found.extend(self.empty_critical_dirs(entries));
        found
    }

    fn duplicate_markers(&self, entries: &[ScanEntry]) -> Option<AntiPattern> {
        let paths = sorted_paths(
            entries
                .iter()
                .filter(|e| self.marker.is_match(e.path.file_name())),
        );
        (paths.len() > 1).then(|| {
            AntiPattern::new(
                AntiPatternKind::DuplicateMarkers,
                Severity::Warning,
                format!(
                    "Multiple files matching '{}' found: {}",
                    self.marker_pattern,
                    join(&paths)
                ),
                paths,
            )
        })
    }

    fn disallowed_root_files(&self, entries: &[ScanEntry]) -> Option<AntiPattern> {
        let paths = sorted_paths(root_files(entries).filter(|e| {
            self.root_disallowed.is_match(e.path.file_name())
        }));
        (!paths.is_empty()).then(|| {
            AntiPattern::new(
                AntiPatternKind::DisallowedRootFiles,
                Severity::Error,
                format!(
                    "Files in project root belong in a subdirectory: {}",
                    join(&paths)
                ),
                paths,
            )
        })
    }

    fn scattered_configs(&self, entries: &[ScanEntry]) -> Option<AntiPattern> {
        let paths = sorted_paths(root_files(entries).filter(|e| {
            let name = e.path.file_name();
            self.config_patterns.is_match(name)
                && !self.root_config_exceptions.iter().any(|x| x == name)
        }));
        (!paths.is_empty()).then(|| {
            AntiPattern::new(
                AntiPatternKind::ScatteredConfigs,
                Severity::Warning,
                format!(
                    "Config files outside '{}': {}",
                    self.config_dir.display_location(),
                    join(&paths)
                ),
                paths,
            )
        })
    }

    fn deep_nesting(&self, entries: &[ScanEntry]) -> Option<AntiPattern> {
        let paths = sorted_paths(
            entries
                .iter()
                .filter(|e| e.path.segment_count() > self.max_depth),
        );
        if paths.is_empty() {
            return None;
        }

        let shown = &paths[..paths.len().min(DEEP_NESTING_EXAMPLES)];
        let ellipsis = if paths.len() > DEEP_NESTING_EXAMPLES { "..." } else { "" };
        Some(AntiPattern::new(
            AntiPatternKind::DeepNesting,
            Severity::Warning,
            format!(
                "Very deep directory nesting (>{} levels): {}{ellipsis}",
                self.max_depth,
                join(shown)
            ),
            paths,
        ))
    }

    fn empty_critical_dirs(&self, entries: &[ScanEntry]) -> Vec<AntiPattern> {
        self.critical_dirs
            .iter()
            .filter(|dir| {
                entries
                    .iter()
                    .any(|e| e.is_dir && e.path == **dir && e.child_count == 0)
            })
            .map(|dir| {
                AntiPattern::new(
                    AntiPatternKind::EmptyCriticalDir,
                    Severity::Error,
                    format!("Critical directory is empty: {dir}"),
                    vec![dir.clone()],
                )
            })
            .collect()
    }
}

fn root_files(entries: &[ScanEntry]) -> impl Iterator<Item = &ScanEntry> {
    entries
        .iter()
        .filter(|e| !e.is_dir && e.path.parent().is_root())
}

fn sorted_paths<'a>(entries: impl Iterator<Item = &'a ScanEntry>) -> Vec<NormalizedPath> {
    let mut paths: Vec<NormalizedPath> = entries.map(|e| e.path.clone()).collect();
    paths.sort();
    paths
}

fn join(paths: &[NormalizedPath]) -> String {
    paths
        .iter()
        .map(NormalizedPath::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "anti_pattern_tests.rs"]
mod tests;
