use std::io::Write;

use crate::checker::{
    AntiPattern, ContentStatus, EntryKind, Finding, FindingCategory, ManifestRecord, RoleRecord,
    Severity,
};
use crate::error::Result;
use crate::report::{Report, ValidationMode};

use super::OutputFormatter;

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Auto-detect: use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

/// ANSI color codes
mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BOLD: &str = "\x1b[1m";
    pub const RESET: &str = "\x1b[0m";
}

/// Human-readable size with one decimal: `512.0B`, `1.5KB`, ..., `2.0TB`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_size(bytes: u64) -> String {
    let mut size = bytes as f64;
    for unit in ["B", "KB", "MB", "GB"] {
        if size < 1024.0 {
            return format!("{size:.1}{unit}");
        }
        size /= 1024.0;
    }
    format!("{size:.1}TB")
}

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    /// With `verbose >= 1` good manifest entries are listed too.
    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
            verbose,
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    const fn severity_style(severity: Severity) -> (&'static str, &'static str) {
        match severity {
            Severity::Error => ("✗", ansi::RED),
            Severity::Warning => ("⚠", ansi::YELLOW),
            Severity::Info => ("○", ansi::CYAN),
        }
    }

    fn heading(&self, text: &str, output: &mut Vec<u8>) {
        writeln!(output, "{}", self.paint(text, ansi::BOLD)).ok();
    }

    fn format_statistics(&self, report: &Report, output: &mut Vec<u8>) {
        let stats = &report.statistics;
        self.heading("Statistics:", output);
        writeln!(output, "  Directories scanned: {}", stats.directories_scanned).ok();
        writeln!(output, "  Files scanned: {}", stats.files_scanned).ok();
        writeln!(output, "  Total size: {}", format_size(stats.total_size_bytes)).ok();
        if report.mode == ValidationMode::Full {
            writeln!(
                output,
                "  Manifest entries checked: {} directories, {} files",
                stats.manifest_directories_checked, stats.manifest_files_checked
            )
            .ok();
        }
        writeln!(output).ok();
    }

    fn format_finding(&self, finding: &Finding, output: &mut Vec<u8>) {
        let (icon, color) = Self::severity_style(finding.severity);
        let slash = if finding.kind == EntryKind::Directory { "/" } else { "" };
        let optional = if finding.optional { " (optional)" } else { "" };
        writeln!(
            output,
            "  {} {}{slash} - {}{optional}",
            self.paint(icon, color),
            finding.path,
            finding.reason
        )
        .ok();
    }

    fn format_findings(&self, report: &Report, output: &mut Vec<u8>) {
        for category in FindingCategory::ALL {
            let findings = report.findings_in(category);
            if findings.is_empty() {
                continue;
            }
            let title = format!(
                "{} ({}):",
                category.label().to_uppercase(),
                findings.len()
            );
            self.heading(&title, output);
            for finding in findings {
                self.format_finding(finding, output);
            }
            writeln!(output).ok();
        }
    }

    fn format_anti_patterns(&self, anti_patterns: &[AntiPattern], output: &mut Vec<u8>) {
        if anti_patterns.is_empty() {
            writeln!(output, "{} No anti-patterns detected", self.paint("✓", ansi::GREEN)).ok();
            writeln!(output).ok();
            return;
        }
        self.heading("Anti-patterns:", output);
        for anti in anti_patterns {
            let (icon, color) = Self::severity_style(anti.severity);
            let label = format!("[{}]", anti.severity.label());
            writeln!(
                output,
                "  {} {} {}",
                self.paint(icon, color),
                self.paint(&label, color),
                anti.message
            )
            .ok();
        }
        writeln!(output).ok();
    }

    fn format_record(&self, record: &ManifestRecord, output: &mut Vec<u8>) {
        let (icon, color) = match record.status {
            ContentStatus::Good => ("✓", ansi::GREEN),
            ContentStatus::EmptyAllowed => ("○", ansi::CYAN),
            ContentStatus::Missing if record.optional => ("○", ansi::CYAN),
            ContentStatus::MinimalNormal | ContentStatus::Minimal => ("⚠", ansi::YELLOW),
            ContentStatus::Missing
            | ContentStatus::EmptyProblematic
            | ContentStatus::MinimalCritical => ("✗", ansi::RED),
        };
        let detail = match (record.kind, record.size_bytes, record.item_count) {
            (EntryKind::File, Some(size), _) => format!(", {}", format_size(size)),
            (EntryKind::Directory, _, Some(items)) => format!(", {items} items"),
            _ => String::new(),
        };
        let slash = if record.kind == EntryKind::Directory { "/" } else { "" };
        let optional = if record.optional { ", optional" } else { "" };
        writeln!(
            output,
            "  {} {}{slash} ({}{detail}{optional})",
            self.paint(icon, color),
            record.path,
            record.status.label()
        )
        .ok();
    }

    fn format_manifest(&self, records: &[ManifestRecord], output: &mut Vec<u8>) {
        let shown: Vec<&ManifestRecord> = records
            .iter()
            .filter(|r| self.verbose >= 1 || r.status != ContentStatus::Good)
            .collect();
        if shown.is_empty() {
            return;
        }
        self.heading("Manifest:", output);
        for record in shown {
            self.format_record(record, output);
        }
        writeln!(output).ok();
    }

    fn format_roles(&self, roles: &[RoleRecord], output: &mut Vec<u8>) {
        if roles.is_empty() {
            return;
        }
        self.heading("Roles:", output);
        for role in roles {
            if !role.present {
                writeln!(output, "  {} {} (missing)", self.paint("✗", ansi::RED), role.name).ok();
                continue;
            }
            let (icon, color) = if role.has_important_files {
                ("✓", ansi::GREEN)
            } else {
                ("⚠", ansi::YELLOW)
            };
            writeln!(
                output,
                "  {} {} ({} items)",
                self.paint(icon, color),
                role.name,
                role.item_count
            )
            .ok();
        }
        writeln!(output).ok();
    }

    fn format_summary(&self, report: &Report, output: &mut Vec<u8>) {
        let s = &report.summary;
        writeln!(
            output,
            "Summary: {} forbidden, {} misplaced, {} naming, {} missing ({} optional), \
             {} empty, {} minimal critical, {} anti-pattern errors, {} found",
            s.forbidden,
            s.misplaced,
            s.naming_violations,
            s.missing_required,
            s.missing_optional,
            s.empty_problematic,
            s.minimal_critical,
            s.anti_pattern_errors,
            s.found
        )
        .ok();

        let verdict = if report.passed() {
            self.paint("PASSED", ansi::GREEN)
        } else {
            self.paint("FAILED", ansi::RED)
        };
        writeln!(output, "Result: {verdict} ({} violations)", s.total_violations).ok();
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        let mut output = Vec::new();

        let mode = match report.mode {
            ValidationMode::Full => "full",
            ValidationMode::ViolationsOnly => "violations only",
        };
        writeln!(output, "Project structure report: {} ({mode})", report.root).ok();
        writeln!(output).ok();

        self.format_statistics(report, &mut output);
        self.format_findings(report, &mut output);
        self.format_anti_patterns(&report.anti_patterns, &mut output);
        self.format_manifest(&report.manifest, &mut output);
        self.format_roles(&report.roles, &mut output);
        self.format_summary(report, &mut output);

        Ok(String::from_utf8_lossy(&output).to_string())
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
