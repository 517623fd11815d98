use std::collections::HashMap;
use std::io::{Error, ErrorKind};
use std::path::{Path, PathBuf};

use super::*;
use crate::config::{AntiPatternConfig, LocationRule, Manifest, SizeThresholds};

#[derive(Default)]
struct MockFileSystem {
    files: HashMap<PathBuf, String>,
}

impl MockFileSystem {
    fn new() -> Self {
        Self::default()
    }

    fn with_file(mut self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files.insert(path.into(), content.to_string());
        self
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| Error::new(ErrorKind::NotFound, "file not found"))
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.contains_key(path)
    }
}

// =============================================================================
// Discovery
// =============================================================================

#[test]
fn discover_without_local_config_returns_defaults() {
    let loader = RuleSetLoader::with_fs(MockFileSystem::new());
    let result = loader.discover(Path::new("/project"));

    assert_eq!(result.rules, RuleSet::default());
    assert!(result.source.is_none());
    assert!(result.warnings.is_empty());
}

#[test]
fn discover_uses_local_config_in_root() {
    let fs = MockFileSystem::new().with_file(
        "/project/.layout-guard.toml",
        r#"root_forbidden = ["*.rb"]"#,
    );
    let loader = RuleSetLoader::with_fs(fs);
    let result = loader.discover(Path::new("/project"));

    assert_eq!(result.rules.root_forbidden, vec!["*.rb".to_string()]);
    assert_eq!(
        result.source.as_deref(),
        Some(Path::new("/project/.layout-guard.toml"))
    );
}

// =============================================================================
// Overlay semantics
// =============================================================================

#[test]
fn overlay_replaces_keys_wholesale() {
    let fs = MockFileSystem::new().with_file(
        "/rules.toml",
        r#"
forbidden_file_patterns = ["*.key"]

[location_rules.src]
allowed = ["*.rs"]
forbidden = ["*.sh"]
"#,
    );
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.toml"));

    assert_eq!(result.rules.forbidden_file_patterns, vec!["*.key".to_string()]);
    assert_eq!(result.rules.location_rules.len(), 1);
    assert_eq!(
        result.rules.location_rules["src"],
        LocationRule {
            allowed: vec!["*.rs".to_string()],
            forbidden: vec!["*.sh".to_string()],
        }
    );
    // Untouched keys keep their defaults
    assert_eq!(
        result.rules.forbidden_dir_names,
        RuleSet::default().forbidden_dir_names
    );
    assert!(result.warnings.is_empty());
}

#[test]
fn overlay_tables_keep_declaration_order() {
    let fs = MockFileSystem::new().with_file(
        "/rules.toml",
        r#"
[location_rules.zeta]
allowed = ["*.rs"]

[location_rules.alpha]
allowed = ["*.py"]
"#,
    );
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.toml"));

    let keys: Vec<&str> = result.rules.location_rules.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["zeta", "alpha"]);
}

#[test]
fn overlay_partial_table_fills_missing_fields_from_field_defaults() {
    let fs = MockFileSystem::new().with_file(
        "/rules.toml",
        "[size_thresholds]\nmin_file_bytes = 3\n",
    );
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.toml"));

    assert_eq!(
        result.rules.size_thresholds,
        SizeThresholds {
            min_file_bytes: 3,
            ..SizeThresholds::default()
        }
    );
}

#[test]
fn partial_anti_patterns_table_keeps_default_lists() {
    let fs = MockFileSystem::new().with_file("/rules.toml", "[anti_patterns]\nmax_depth = 6\n");
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.toml"));

    assert_eq!(
        result.rules.anti_patterns,
        AntiPatternConfig {
            max_depth: 6,
            ..AntiPatternConfig::default()
        }
    );
    assert!(!result.rules.anti_patterns.root_disallowed.is_empty());
    assert!(!result.rules.anti_patterns.critical_dirs.is_empty());
    assert!(result.warnings.is_empty());
}

#[test]
fn partial_manifest_table_keeps_default_entries() {
    let fs = MockFileSystem::new().with_file("/rules.toml", "[manifest]\nroles_required = true\n");
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.toml"));

    let manifest = &result.rules.manifest;
    assert!(manifest.roles_required);
    assert_eq!(manifest.roles, Manifest::default().roles);
    assert_eq!(manifest.directories, Manifest::default().directories);
    assert_eq!(manifest.files, Manifest::default().files);
    assert!(result.warnings.is_empty());
}

#[test]
fn ignore_empty_dirs_is_accepted_as_alias() {
    let fs = MockFileSystem::new().with_file("/rules.toml", r#"ignore_empty_dirs = ["data"]"#);
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.toml"));

    assert_eq!(result.rules.ignore_empty_dir_prefixes, vec!["data".to_string()]);
    assert!(result.warnings.is_empty());

    let parsed: RuleSet = toml::from_str(r#"ignore_empty_dirs = ["data"]"#).unwrap();
    assert_eq!(parsed.ignore_empty_dir_prefixes, vec!["data".to_string()]);
}

#[test]
fn yaml_overlay_selected_by_extension() {
    let fs = MockFileSystem::new().with_file(
        "/rules.yml",
        r#"
root_forbidden:
  - "*.txt"
location_rules:
  scripts:
    allowed: ["*.sh"]
anti_patterns:
  max_depth: 3
"#,
    );
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.yml"));

    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    assert_eq!(result.rules.root_forbidden, vec!["*.txt".to_string()]);
    assert_eq!(result.rules.location_rules["scripts"].allowed, vec!["*.sh".to_string()]);
    assert_eq!(result.rules.anti_patterns.max_depth, 3);
    assert_eq!(
        result.rules.anti_patterns.config_dir,
        AntiPatternConfig::default().config_dir
    );
    assert_eq!(result.source.as_deref(), Some(Path::new("/rules.yml")));
}

#[test]
fn empty_yaml_overlay_uses_defaults() {
    let fs = MockFileSystem::new().with_file("/rules.yaml", "");
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.yaml"));

    assert_eq!(result.rules, RuleSet::default());
    assert!(result.warnings.is_empty());
}

#[test]
fn broken_yaml_overlay_warns_and_uses_defaults() {
    let fs = MockFileSystem::new().with_file("/rules.yaml", "root_forbidden: [unclosed");
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.yaml"));

    assert_eq!(result.rules, RuleSet::default());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("YAML parse error"));
}

#[test]
fn json_overlay_selected_by_extension() {
    let fs = MockFileSystem::new().with_file(
        "/rules.json",
        r#"{"critical_files": ["README.md"], "allowed_exceptions": []}"#,
    );
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.json"));

    assert_eq!(result.rules.critical_files, vec!["README.md".to_string()]);
    assert!(result.rules.allowed_exceptions.is_empty());
    assert!(result.warnings.is_empty());
}

// =============================================================================
// Configuration errors are warnings, never fatal
// =============================================================================

#[test]
fn missing_overlay_file_warns_and_uses_defaults() {
    let loader = RuleSetLoader::with_fs(MockFileSystem::new());
    let result = loader.load_from_path(Path::new("/absent.toml"));

    assert_eq!(result.rules, RuleSet::default());
    assert!(result.source.is_none());
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("Could not load config file"));
}

#[test]
fn unparseable_document_warns_and_uses_defaults() {
    let fs = MockFileSystem::new().with_file("/rules.toml", "forbidden_file_patterns = [");
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.toml"));

    assert_eq!(result.rules, RuleSet::default());
    assert_eq!(result.warnings.len(), 1);
}

#[test]
fn malformed_section_keeps_its_default_and_applies_the_rest() {
    let fs = MockFileSystem::new().with_file(
        "/rules.toml",
        r#"
forbidden_file_patterns = "*.key"
root_forbidden = ["*.rb"]
"#,
    );
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.toml"));

    assert_eq!(
        result.rules.forbidden_file_patterns,
        RuleSet::default().forbidden_file_patterns
    );
    assert_eq!(result.rules.root_forbidden, vec!["*.rb".to_string()]);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].contains("forbidden_file_patterns"));
}

#[test]
fn unknown_key_is_reported() {
    let fs = MockFileSystem::new().with_file("/rules.toml", "colour = \"blue\"\n");
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.toml"));

    assert_eq!(result.rules, RuleSet::default());
    assert!(result.warnings[0].contains("unknown key 'colour'"));
}

#[test]
fn malformed_glob_is_accepted_at_load_time() {
    let fs = MockFileSystem::new().with_file(
        "/rules.toml",
        r#"forbidden_file_patterns = ["[unclosed"]"#,
    );
    let result = RuleSetLoader::with_fs(fs).load_from_path(Path::new("/rules.toml"));

    assert_eq!(
        result.rules.forbidden_file_patterns,
        vec!["[unclosed".to_string()]
    );
    assert!(result.warnings.is_empty());
}

#[test]
fn apply_overlay_rejects_non_table_document() {
    let (rules, warnings) = apply_overlay(RuleSet::default(), &serde_json::json!([1, 2]));
    assert_eq!(rules, RuleSet::default());
    assert_eq!(warnings.len(), 1);
}

#[test]
fn overlay_format_from_path() {
    assert_eq!(OverlayFormat::from_path(Path::new("a.json")), OverlayFormat::Json);
    assert_eq!(OverlayFormat::from_path(Path::new("a.JSON")), OverlayFormat::Json);
    assert_eq!(OverlayFormat::from_path(Path::new("a.yml")), OverlayFormat::Yaml);
    assert_eq!(OverlayFormat::from_path(Path::new("a.YAML")), OverlayFormat::Yaml);
    assert_eq!(OverlayFormat::from_path(Path::new("a.toml")), OverlayFormat::Toml);
    assert_eq!(OverlayFormat::from_path(Path::new("rules")), OverlayFormat::Toml);
}
