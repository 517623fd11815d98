use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{LayoutGuardError, Result};

use super::RuleSet;

/// Overlay file looked up in the project root when no explicit overlay is given.
pub const LOCAL_CONFIG_NAME: &str = ".layout-guard.toml";

/// Result of loading an overlay: the effective rule set plus what went wrong on the way.
///
/// Loading never fails; problems are collected as warnings so the caller decides how
/// to surface them.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadResult {
    pub rules: RuleSet,
    /// Overlay file that was applied, if any.
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

impl Default for LoadResult {
    fn default() -> Self {
        Self {
            rules: RuleSet::default(),
            source: None,
            warnings: Vec::new(),
        }
    }
}

impl LoadResult {
    fn warn(&mut self, message: String) {
        tracing::warn!("{message}");
        self.warnings.push(message);
    }
}

/// Overlay document syntax, picked from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayFormat {
    Toml,
    Json,
    Yaml,
}

impl OverlayFormat {
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            Some(ext) if ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml") => {
                Self::Yaml
            }
            _ => Self::Toml,
        }
    }
}

/// Trait for filesystem operations (for testability).
pub trait FileSystem {
    /// Read file contents as a string.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

    fn exists(&self, path: &Path) -> bool;
}

/// Real filesystem implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

/// Builds the effective `RuleSet` from the built-in defaults and an optional overlay.
#[derive(Debug, Default)]
pub struct RuleSetLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl RuleSetLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> RuleSetLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    /// Load the overlay at `root/.layout-guard.toml` if it exists, otherwise the defaults.
    pub fn discover(&self, root: &Path) -> LoadResult {
        let candidate = root.join(LOCAL_CONFIG_NAME);
        if self.fs.exists(&candidate) {
            self.load_from_path(&candidate)
        } else {
            LoadResult::default()
        }
    }

    /// Apply the overlay document at `path` on top of the defaults.
    pub fn load_from_path(&self, path: &Path) -> LoadResult {
        let mut result = LoadResult::default();

        let content = match self.fs.read_to_string(path) {
            Ok(content) => content,
            Err(source) => {
                let err = LayoutGuardError::FileRead {
                    path: path.to_path_buf(),
                    source,
                };
                result.warn(format!("Could not load config file {}: {err}", path.display()));
                return result;
            }
        };

        match parse_overlay(&content, OverlayFormat::from_path(path)) {
            Ok(document) => {
                let (rules, warnings) = apply_overlay(RuleSet::default(), &document);
                result.rules = rules;
                result.source = Some(path.to_path_buf());
                for warning in warnings {
                    result.warn(format!("{}: {warning}", path.display()));
                }
            }
            Err(e) => {
                result.warn(format!("Could not load config file {}: {e}", path.display()));
            }
        }

        result
    }
}

/// Parse an overlay document into a generic tree.
///
/// # Errors
/// Returns an error if the document is not valid TOML, JSON or YAML.
pub fn parse_overlay(content: &str, format: OverlayFormat) -> Result<Value> {
    match format {
        OverlayFormat::Json => Ok(serde_json::from_str(content)?),
        // An empty YAML document is an empty overlay.
        OverlayFormat::Yaml if content.trim().is_empty() => {
            Ok(Value::Object(serde_json::Map::new()))
        }
        OverlayFormat::Yaml => match serde_yaml::from_str(content)? {
            Value::Null => Ok(Value::Object(serde_json::Map::new())),
            document => Ok(document),
        },
        OverlayFormat::Toml => {
            let table: toml::Table = toml::from_str(content)?;
            Ok(serde_json::to_value(table)?)
        }
    }
}

/// Replace every top-level key of `base` that the overlay names.
///
/// Keys are replaced wholesale. A key whose value does not parse keeps its default,
/// and unknown keys are skipped; both are reported in the returned warnings.
#[must_use]
pub fn apply_overlay(mut base: RuleSet, document: &Value) -> (RuleSet, Vec<String>) {
    let mut warnings = Vec::new();

    let Value::Object(entries) = document else {
        warnings.push("overlay must be a table of rule keys; using defaults".to_string());
        return (base, warnings);
    };

    for (key, value) in entries {
        let w = &mut warnings;
        match key.as_str() {
            "forbidden_file_patterns" => replace(&mut base.forbidden_file_patterns, key, value, w),
            "forbidden_dir_names" => replace(&mut base.forbidden_dir_names, key, value, w),
            "allowed_exceptions" => replace(&mut base.allowed_exceptions, key, value, w),
            "root_forbidden" => replace(&mut base.root_forbidden, key, value, w),
            "ignore_empty_files" => replace(&mut base.ignore_empty_files, key, value, w),
            "ignore_empty_dir_prefixes" | "ignore_empty_dirs" => {
                replace(&mut base.ignore_empty_dir_prefixes, key, value, w);
            }
            "critical_files" => replace(&mut base.critical_files, key, value, w),
            "important_extensions" => replace(&mut base.important_extensions, key, value, w),
            "location_rules" => replace(&mut base.location_rules, key, value, w),
            "expected_locations" => replace(&mut base.expected_locations, key, value, w),
            "naming_rules" => replace(&mut base.naming_rules, key, value, w),
            "size_thresholds" => replace(&mut base.size_thresholds, key, value, w),
            "manifest" => replace(&mut base.manifest, key, value, w),
            "anti_patterns" => replace(&mut base.anti_patterns, key, value, w),
            _ => w.push(format!("unknown key '{key}' ignored")),
        }
    }

    (base, warnings)
}

fn replace<T: DeserializeOwned>(
    slot: &mut T,
    key: &str,
    value: &Value,
    warnings: &mut Vec<String>,
) {
    match T::deserialize(value) {
        Ok(parsed) => *slot = parsed,
        Err(e) => warnings.push(format!("could not parse '{key}' ({e}); keeping defaults")),
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
