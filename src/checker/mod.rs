mod anti_pattern;
mod classifier;
mod finding;
mod manifest;
mod naming;
mod patterns;

pub use anti_pattern::{AntiPattern, AntiPatternDetector, AntiPatternKind};
pub use classifier::Classifier;
pub use finding::{EntryKind, Finding, FindingCategory, Severity};
pub use manifest::{
    ContentStatus, ExpectedStructureChecker, ManifestOutcome, ManifestRecord, RoleRecord,
};
pub use naming::{NamingCategory, NamingRules};
pub use patterns::{PatternSet, compile_glob, compile_naming_regex, pattern_errors};

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
