use std::fs;

use crate::config::RuleSet;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, LayoutGuardError, Result};

const TEMPLATE_HEADER: &str = "\
# layout-guard configuration file
#
# Every key below holds its built-in value. Keys present in this file replace
# the built-in value wholesale; delete a key to fall back to the default.
# Globs match the file name or the whole project-relative path, and `*` also
# crosses `/`. Naming patterns are regexes anchored at the start of the name.
";

#[must_use]
pub fn run_init(args: &crate::cli::InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Initializes a new configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &crate::cli::InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(LayoutGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    let template = generate_config_template()?;

    fs::write(output_path, template)?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

/// The built-in rule set as a commented TOML overlay.
///
/// # Errors
/// Returns an error if the rule set cannot be serialized.
pub fn generate_config_template() -> Result<String> {
    let body = toml::to_string_pretty(&RuleSet::default())?;
    Ok(format!("{TEMPLATE_HEADER}\n{body}"))
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
