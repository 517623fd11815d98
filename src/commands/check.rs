use std::fs;
use std::path::Path;

use crate::cli::{CheckArgs, Cli};
use crate::engine::Validator;
use crate::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, ScanProgress, TextFormatter,
};
use crate::report::{Report, ValidationMode};
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, EXIT_VIOLATIONS_FOUND, LayoutGuardError};

use super::context::{color_choice_to_mode, load_rules, write_output};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Validates the tree at `args.path` and writes the report.
///
/// # Errors
/// Returns an error if the root does not exist, or the report cannot be
/// formatted or written.
pub(crate) fn run_check_impl(args: &CheckArgs, cli: &Cli) -> crate::Result<i32> {
    let root = args.path.as_path();
    if !root.exists() {
        return Err(LayoutGuardError::Config(format!(
            "Project root does not exist: {}",
            root.display()
        )));
    }

    let loaded = load_rules(args.config.as_deref(), root, cli.no_config);
    if let Some(source) = &loaded.source {
        tracing::info!("Using configuration from {}", source.display());
    }

    let mode = if args.violations_only {
        ValidationMode::ViolationsOnly
    } else {
        ValidationMode::Full
    };
    let report = Validator::new(&loaded.rules)
        .with_progress(ScanProgress::new(cli.quiet))
        .run(root, mode);

    let output = format_report(
        args.format,
        &report,
        color_choice_to_mode(cli.color),
        cli.verbose,
    )?;
    write_output(args.output.as_deref(), &output, cli.quiet)?;

    if let Some(export_path) = &args.export {
        export_report(export_path, &report)?;
    }

    Ok(if report.passed() {
        EXIT_SUCCESS
    } else {
        EXIT_VIOLATIONS_FOUND
    })
}

pub(crate) fn format_report(
    format: OutputFormat,
    report: &Report,
    color_mode: ColorMode,
    verbose: u8,
) -> crate::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::with_verbose(color_mode, verbose).format(report),
        OutputFormat::Json => JsonFormatter.format(report),
    }
}

/// Write the report as JSON, whatever the stdout format is.
pub(crate) fn export_report(path: &Path, report: &Report) -> crate::Result<()> {
    let json = JsonFormatter.format(report)?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    tracing::info!("Report exported to {}", path.display());
    Ok(())
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
