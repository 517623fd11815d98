use std::error::Error as _;
use std::path::Path;

use crate::checker::pattern_errors;
use crate::cli::{Cli, ConfigAction, ConfigArgs};
use crate::config::{LoadResult, RuleSetLoader};
use crate::output::OutputFormat;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, LayoutGuardError, Result};

use super::context::load_rules;

#[must_use]
pub fn run_config(args: &ConfigArgs, cli: &Cli) -> i32 {
    match &args.action {
        ConfigAction::Validate { config } => run_config_validate(config),
        ConfigAction::Show { config, format } => run_config_show(config.as_deref(), *format, cli),
    }
}

fn run_config_validate(config_path: &Path) -> i32 {
    match run_config_validate_impl(config_path) {
        Ok(problems) if problems.is_empty() => {
            println!("Configuration is valid: {}", config_path.display());
            EXIT_SUCCESS
        }
        Ok(problems) => {
            for problem in &problems {
                eprintln!("  {problem}");
            }
            eprintln!(
                "Configuration has {} problem(s): {}",
                problems.len(),
                config_path.display()
            );
            EXIT_CONFIG_ERROR
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Loads the overlay at `config_path` and lists everything wrong with it: load
/// warnings first, then every glob or regex of the effective rule set that fails
/// to compile.
///
/// # Errors
/// Returns an error if the file does not exist.
pub(crate) fn run_config_validate_impl(config_path: &Path) -> Result<Vec<String>> {
    if !config_path.exists() {
        return Err(LayoutGuardError::Config(format!(
            "Configuration file not found: {}",
            config_path.display()
        )));
    }

    let LoadResult {
        rules, warnings, ..
    } = RuleSetLoader::new().load_from_path(config_path);

    let mut problems = warnings;
    problems.extend(pattern_errors(&rules).iter().map(describe_pattern_error));
    Ok(problems)
}

fn describe_pattern_error(error: &LayoutGuardError) -> String {
    match error.source() {
        Some(source) => format!("[{}] {error}: {source}", error.error_type()),
        None => format!("[{}] {error}", error.error_type()),
    }
}

fn run_config_show(config_path: Option<&Path>, format: OutputFormat, cli: &Cli) -> i32 {
    match run_config_show_impl(config_path, format, cli) {
        Ok(output) => {
            print!("{output}");
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Renders the effective rule set for the current directory.
///
/// # Errors
/// Returns an error if serialization fails.
pub(crate) fn run_config_show_impl(
    config_path: Option<&Path>,
    format: OutputFormat,
    cli: &Cli,
) -> Result<String> {
    let loaded = load_rules(config_path, Path::new("."), cli.no_config);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&loaded.rules)?;
            Ok(format!("{json}\n"))
        }
        OutputFormat::Text => format_config_text(&loaded),
    }
}

/// TOML rendering of the rule set, preceded by where it came from.
///
/// # Errors
/// Returns an error if the rule set cannot be serialized.
pub(crate) fn format_config_text(loaded: &LoadResult) -> Result<String> {
    let source = loaded
        .source
        .as_ref()
        .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());
    let body = toml::to_string_pretty(&loaded.rules)?;
    Ok(format!("# Effective configuration ({source})\n\n{body}"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
