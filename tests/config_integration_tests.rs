//! Integration tests for the `config` command.

mod common;

use common::TestFixture;
use predicates::prelude::*;

// =============================================================================
// Config Validate Tests
// =============================================================================

#[test]
fn config_validate_valid_config() {
    let fixture = TestFixture::new();
    fixture.create_config(common::SMALL_MANIFEST_CONFIG);

    layout_guard!()
        .current_dir(fixture.path())
        .args(["config", "validate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn config_validate_missing_file() {
    let fixture = TestFixture::new();

    layout_guard!()
        .current_dir(fixture.path())
        .args(["config", "validate", "-c", "nope.toml"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn config_validate_lists_bad_patterns() {
    let fixture = TestFixture::new();
    fixture.create_config(
        r#"
root_forbidden = ["[oops"]

[naming_rules.scripts]
pattern = "(unclosed"
description = "broken"
"#,
    );

    layout_guard!()
        .current_dir(fixture.path())
        .args(["config", "validate"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid glob pattern: [oops"))
        .stderr(predicate::str::contains("Invalid naming regex: (unclosed"))
        .stderr(predicate::str::contains("2 problem(s)"));
}

#[test]
fn config_bad_patterns_do_not_break_check() {
    let fixture = TestFixture::new();
    fixture.create_config("root_forbidden = [\"[oops\"]\n");
    fixture.create_file("deploy.rb", "puts 1");

    layout_guard!()
        .current_dir(fixture.path())
        .args(["check", "--violations-only", "--color", "never"])
        .assert()
        .success();
}

// =============================================================================
// Config Show Tests
// =============================================================================

#[test]
fn config_show_defaults_as_toml() {
    let fixture = TestFixture::new();

    layout_guard!()
        .current_dir(fixture.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Effective configuration (built-in defaults)"))
        .stdout(predicate::str::contains("[size_thresholds]"));
}

#[test]
fn config_show_json_reflects_local_overlay() {
    let fixture = TestFixture::new();
    fixture.create_config("root_forbidden = [\"*.rb\"]\n");

    let output = layout_guard!()
        .current_dir(fixture.path())
        .args(["config", "show", "--format", "json"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["root_forbidden"], serde_json::json!(["*.rb"]));
    assert_eq!(json["size_thresholds"]["min_critical_file_bytes"], 100);
}

#[test]
fn config_show_no_config_ignores_overlay() {
    let fixture = TestFixture::new();
    fixture.create_config("root_forbidden = [\"*.rb\"]\n");

    layout_guard!()
        .current_dir(fixture.path())
        .args(["--no-config", "config", "show", "-f", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("*.rb").not());
}
