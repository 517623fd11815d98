use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::defaults;

/// Allowed and forbidden name patterns for files beneath a directory prefix.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocationRule {
    /// File name globs that belong under the prefix.
    #[serde(default)]
    pub allowed: Vec<String>,

    /// File name globs that must not appear under the prefix.
    /// Only consulted for files that match none of `allowed`.
    #[serde(default)]
    pub forbidden: Vec<String>,
}

/// A naming convention: regex over the basename plus the message shown on violation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamingRule {
    pub pattern: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SizeThresholds {
    /// Files smaller than this (but non-empty) are minimal.
    pub min_file_bytes: u64,

    /// Stricter minimum applied to `critical_files`.
    pub min_critical_file_bytes: u64,

    /// Directories with fewer items and no important file are minimal.
    pub min_dir_items: usize,
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            min_file_bytes: defaults::min_file_bytes(),
            min_critical_file_bytes: defaults::min_critical_file_bytes(),
            min_dir_items: defaults::min_dir_items(),
        }
    }
}

/// One expected path in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    pub path: String,
    #[serde(default)]
    pub optional: bool,
}

impl ManifestEntry {
    #[must_use]
    pub fn required(path: &str) -> Self {
        Self {
            path: path.to_string(),
            optional: false,
        }
    }

    #[must_use]
    pub fn optional(path: &str) -> Self {
        Self {
            path: path.to_string(),
            optional: true,
        }
    }
}

/// Declarative list of expected directories, files and named roles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Manifest {
    /// Directory whose direct children are roles.
    pub roles_root: String,

    /// Role names expected under `roles_root`.
    pub roles: Vec<String>,

    /// Missing roles fail the run when set.
    pub roles_required: bool,

    pub directories: Vec<ManifestEntry>,

    pub files: Vec<ManifestEntry>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            roles_root: defaults::roles_root(),
            roles: defaults::manifest_roles(),
            roles_required: false,
            directories: defaults::manifest_directories(),
            files: defaults::manifest_files(),
        }
    }
}

/// Settings for the whole-tree heuristics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AntiPatternConfig {
    /// More than one entry matching this basename glob is reported.
    pub marker_pattern: String,

    /// Basename globs that must not sit at the project root.
    pub root_disallowed: Vec<String>,

    /// Basename globs identifying configuration files.
    pub config_patterns: Vec<String>,

    /// Directory configuration files belong in.
    pub config_dir: String,

    /// Root-level file names exempt from the scattered-config heuristic.
    pub root_config_exceptions: Vec<String>,

    /// Paths with more segments than this are deeply nested.
    pub max_depth: usize,

    /// Directories that must not be empty when present.
    pub critical_dirs: Vec<String>,
}

impl Default for AntiPatternConfig {
    fn default() -> Self {
        Self {
            marker_pattern: defaults::marker_pattern(),
            root_disallowed: defaults::strings(&["*.sh", "*.py"]),
            config_patterns: defaults::strings(&["*.yml", "*.yaml", "*.json", "*.cfg", "*.ini"]),
            config_dir: defaults::config_dir(),
            root_config_exceptions: defaults::strings(&["requirements.txt", "Makefile", ".gitignore"]),
            max_depth: defaults::max_depth(),
            critical_dirs: defaults::strings(&["configs/ansible/roles", "scripts/bootstrap", "docs"]),
        }
    }
}

/// Immutable rule set the engine evaluates a tree against.
///
/// Plain values come first and tables last so the struct serializes to valid TOML.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RuleSet {
    /// Basename/path globs for forbidden files.
    pub forbidden_file_patterns: Vec<String>,

    /// Basename/path globs for forbidden directories.
    pub forbidden_dir_names: Vec<String>,

    /// Normalized paths that bypass the forbidden check.
    pub allowed_exceptions: Vec<String>,

    /// Basename globs not allowed directly in the project root.
    pub root_forbidden: Vec<String>,

    /// File names allowed to be empty.
    pub ignore_empty_files: Vec<String>,

    /// Directory prefixes allowed to be empty.
    #[serde(alias = "ignore_empty_dirs")]
    pub ignore_empty_dir_prefixes: Vec<String>,

    /// Normalized paths held to `min_critical_file_bytes`.
    pub critical_files: Vec<String>,

    /// Extensions (without dot) that make a directory's content adequate.
    pub important_extensions: Vec<String>,

    /// Directory prefix to allowed/forbidden file patterns.
    pub location_rules: IndexMap<String, LocationRule>,

    /// File name to the directory it must live in (`""`, `"."` or `"root"` for the root).
    pub expected_locations: IndexMap<String, String>,

    /// Naming conventions keyed by category (`scripts`, `ansible_files`, `python_files`, `roles`).
    pub naming_rules: IndexMap<String, NamingRule>,

    pub size_thresholds: SizeThresholds,

    pub manifest: Manifest,

    pub anti_patterns: AntiPatternConfig,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            forbidden_file_patterns: defaults::forbidden_file_patterns(),
            forbidden_dir_names: defaults::forbidden_dir_names(),
            allowed_exceptions: defaults::allowed_exceptions(),
            root_forbidden: defaults::strings(&["*.sh", "*.py", "*.yml", "*.yaml"]),
            ignore_empty_files: defaults::strings(&[
                ".gitkeep",
                ".gitignore",
                "__init__.py",
                "CHANGELOG.md",
            ]),
            ignore_empty_dir_prefixes: defaults::strings(&[
                "logs",
                "backup/configs",
                "backup/user_data",
                "backup/logs",
            ]),
            critical_files: defaults::strings(&[
                "README.md",
                "configs/ansible/ansible.cfg",
                "scripts/deployment/master_deploy.sh",
                "configs/archinstall/user_configuration.json",
            ]),
            important_extensions: defaults::strings(&["py", "sh", "yml", "yaml", "json", "j2"]),
            location_rules: defaults::location_rules(),
            expected_locations: defaults::expected_locations(),
            naming_rules: defaults::naming_rules(),
            size_thresholds: SizeThresholds::default(),
            manifest: Manifest::default(),
            anti_patterns: AntiPatternConfig::default(),
        }
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
