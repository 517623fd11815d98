use std::fs;
use std::path::Path;

use crate::cli::ColorChoice;
use crate::config::{LoadResult, RuleSetLoader};
use crate::output::ColorMode;

pub(crate) const fn color_choice_to_mode(choice: ColorChoice) -> ColorMode {
    match choice {
        ColorChoice::Auto => ColorMode::Auto,
        ColorChoice::Always => ColorMode::Always,
        ColorChoice::Never => ColorMode::Never,
    }
}

/// Resolve the effective rule set for `root`.
///
/// An explicit `config_path` wins; otherwise the local overlay in `root` is used
/// unless `no_config` is set.
pub(crate) fn load_rules(config_path: Option<&Path>, root: &Path, no_config: bool) -> LoadResult {
    let loader = RuleSetLoader::new();
    match config_path {
        Some(path) => loader.load_from_path(path),
        None if no_config => LoadResult::default(),
        None => loader.discover(root),
    }
}

/// Write `content` to `output_path`, or to stdout when no path is given.
pub(crate) fn write_output(
    output_path: Option<&Path>,
    content: &str,
    quiet: bool,
) -> crate::Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    } else if !quiet {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
