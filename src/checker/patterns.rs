//! Pattern compilation shared by the checkers.
//!
//! Malformed patterns are dropped at compile time and never match anything.
//! `layout-guard config validate` lists them through [`pattern_errors`].

use globset::{Glob, GlobMatcher};
use regex::Regex;

use crate::config::RuleSet;
use crate::error::{LayoutGuardError, Result};

/// Compile one shell glob. `*` crosses `/`, so `*.key` matches `a/b.key` as a full path.
///
/// # Errors
/// Returns `InvalidPattern` if the glob is malformed.
pub fn compile_glob(pattern: &str) -> Result<GlobMatcher> {
    Glob::new(pattern)
        .map(|glob| glob.compile_matcher())
        .map_err(|e| LayoutGuardError::InvalidPattern {
            pattern: pattern.to_string(),
            source: e,
        })
}

/// Compile a naming regex anchored at the start of the input only.
///
/// # Errors
/// Returns `InvalidRegex` if the pattern does not compile.
pub fn compile_naming_regex(pattern: &str) -> Result<Regex> {
    Regex::new(&format!("^(?:{pattern})")).map_err(|e| LayoutGuardError::InvalidRegex {
        pattern: pattern.to_string(),
        source: e,
    })
}

/// Ordered list of globs that remembers which pattern matched.
#[derive(Debug, Clone, Default)]
pub struct PatternSet {
    matchers: Vec<(String, GlobMatcher)>,
}

impl PatternSet {
    #[must_use]
    pub fn new(patterns: &[String]) -> Self {
        let matchers = patterns
            .iter()
            .filter_map(|pattern| match compile_glob(pattern) {
                Ok(matcher) => Some((pattern.clone(), matcher)),
                Err(e) => {
                    tracing::debug!("Dropping pattern: {e}");
                    None
                }
            })
            .collect();
        Self { matchers }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }

    /// First pattern, in declaration order, matching any of `candidates`.
    #[must_use]
    pub fn first_match(&self, candidates: &[&str]) -> Option<&str> {
        self.matchers
            .iter()
            .find(|(_, matcher)| candidates.iter().any(|c| matcher.is_match(c)))
            .map(|(pattern, _)| pattern.as_str())
    }

    #[must_use]
    pub fn is_match(&self, candidate: &str) -> bool {
        self.first_match(&[candidate]).is_some()
    }
}

/// Every glob and regex in `rules` that fails to compile.
#[must_use]
pub fn pattern_errors(rules: &RuleSet) -> Vec<LayoutGuardError> {
    let location_globs = rules
        .location_rules
        .values()
        .flat_map(|rule| rule.allowed.iter().chain(&rule.forbidden));
    let anti = &rules.anti_patterns;

    let globs = rules
        .forbidden_file_patterns
        .iter()
        .chain(&rules.forbidden_dir_names)
        .chain(&rules.root_forbidden)
        .chain(location_globs)
        .chain(std::iter::once(&anti.marker_pattern))
        .chain(&anti.root_disallowed)
        .chain(&anti.config_patterns);

    let mut errors: Vec<LayoutGuardError> = globs
        .filter_map(|pattern| compile_glob(pattern).err())
        .collect();
    errors.extend(
        rules
            .naming_rules
            .values()
            .filter_map(|rule| compile_naming_regex(&rule.pattern).err()),
    );
    errors
}
