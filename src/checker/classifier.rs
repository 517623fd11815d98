use std::collections::HashSet;

use indexmap::IndexMap;

use crate::config::RuleSet;
use crate::path_utils::NormalizedPath;
use crate::scanner::ScanEntry;

use super::finding::{EntryKind, Finding, FindingCategory, Severity};
use super::naming::NamingRules;
use super::patterns::PatternSet;

struct CompiledLocationRule {
    prefix: NormalizedPath,
    allowed: PatternSet,
    forbidden: PatternSet,
}

/// Per-entry rule evaluation.
///
/// Checks run in a fixed order: forbidden, placement, naming. A forbidden entry
/// gets no other finding, and neither does anything beneath a forbidden directory.
pub struct Classifier {
    forbidden_files: PatternSet,
    forbidden_dirs: PatternSet,
    allowed_exceptions: HashSet<NormalizedPath>,
    expected_locations: IndexMap<String, NormalizedPath>,
    location_rules: Vec<CompiledLocationRule>,
    root_forbidden: PatternSet,
    naming: NamingRules,
}

impl Classifier {
    #[must_use]
    pub fn new(rules: &RuleSet) -> Self {
        let location_rules = rules
            .location_rules
            .iter()
            .map(|(prefix, rule)| CompiledLocationRule {
                prefix: NormalizedPath::location(prefix),
                allowed: PatternSet::new(&rule.allowed),
                forbidden: PatternSet::new(&rule.forbidden),
            })
            .collect();

        Self {
            forbidden_files: PatternSet::new(&rules.forbidden_file_patterns),
            forbidden_dirs: PatternSet::new(&rules.forbidden_dir_names),
            allowed_exceptions: rules
                .allowed_exceptions
                .iter()
                .map(|p| NormalizedPath::new(p))
                .collect(),
            expected_locations: rules
                .expected_locations
                .iter()
                .map(|(name, location)| (name.clone(), NormalizedPath::location(location)))
                .collect(),
            location_rules,
            root_forbidden: PatternSet::new(&rules.root_forbidden),
            naming: NamingRules::new(rules),
        }
    }

    /// Every finding for one scanned entry.
    #[must_use]
    pub fn classify(&self, entry: &ScanEntry) -> Vec<Finding> {
        let kind = EntryKind::from_is_dir(entry.is_dir);
        let finding = |category, reason: String| {
            Finding::new(entry.path.clone(), kind, category, Severity::Error, reason)
        };

        if let Some(reason) = self.forbidden_reason(&entry.path, entry.is_dir) {
            return vec![finding(FindingCategory::Forbidden, reason)];
        }
        if self.inside_forbidden_dir(&entry.path) {
            return Vec::new();
        }

        let mut findings = Vec::new();
        if !entry.is_dir
            && let Some(reason) = self.placement_violation(&entry.path)
        {
            findings.push(finding(FindingCategory::Misplaced, reason));
        }
        if let Some(description) = self.naming.violation(entry) {
            findings.push(finding(FindingCategory::NamingViolation, description.to_string()));
        }
        findings
    }

    fn forbidden_reason(&self, path: &NormalizedPath, is_dir: bool) -> Option<String> {
        if self.allowed_exceptions.contains(path) {
            return None;
        }
        let candidates = [path.file_name(), path.as_str()];
        if is_dir {
            self.forbidden_dirs
                .first_match(&candidates)
                .map(|pattern| format!("Forbidden directory: {pattern}"))
        } else {
            self.forbidden_files
                .first_match(&candidates)
                .map(|pattern| format!("Matches forbidden pattern: {pattern}"))
        }
    }

    fn inside_forbidden_dir(&self, path: &NormalizedPath) -> bool {
        path.ancestors()
            .iter()
            .any(|ancestor| self.forbidden_reason(ancestor, true).is_some())
    }

    /// First failing of: expected location, directory location rule, root restriction.
    fn placement_violation(&self, path: &NormalizedPath) -> Option<String> {
        let name = path.file_name();
        let parent = path.parent();

        if let Some(expected) = self.expected_locations.get(name)
            && *expected != parent
        {
            return Some(format!(
                "Should be in '{}' but found in '{}'",
                expected.display_location(),
                parent.display_location()
            ));
        }

        let disallowed_here = self.location_rules.iter().find(|rule| {
            parent.is_within(&rule.prefix)
                && !rule.allowed.is_match(name)
                && rule.forbidden.is_match(name)
        });
        if let Some(rule) = disallowed_here {
            return Some(format!(
                "File type '{name}' not allowed in '{}'",
                rule.prefix.display_location()
            ));
        }

        if parent.is_root() && self.root_forbidden.is_match(name) {
            return Some(format!("File type '{name}' should not be in project root"));
        }

        None
    }
}

#[cfg(test)]
#[path = "classifier_tests.rs"]
mod tests;
