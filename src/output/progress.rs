use std::io::IsTerminal;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner shown while the tree is scanned.
///
/// Hidden in quiet mode or when stderr is not a TTY. The total is unknown up front,
/// so it counts entries instead of showing a bar.
#[derive(Clone)]
pub struct ScanProgress {
    progress_bar: ProgressBar,
}

impl ScanProgress {
    /// The spinner draws to stderr so it never mixes with report output on stdout.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(quiet, is_tty)
    }

    /// A progress handle that never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            progress_bar: ProgressBar::hidden(),
        }
    }

    fn new_with_visibility(quiet: bool, is_tty: bool) -> Self {
        if quiet || !is_tty {
            return Self::hidden();
        }

        let progress_bar = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::with_template("{spinner:.green} Scanning {pos} entries ({elapsed})")
        {
            progress_bar.set_style(style);
        }
        Self { progress_bar }
    }

    pub fn inc(&self) {
        self.progress_bar.inc(1);
    }

    #[must_use]
    pub fn position(&self) -> u64 {
        self.progress_bar.position()
    }

    /// Finishes the spinner and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
