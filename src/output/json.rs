use crate::error::Result;
use crate::report::Report;

use super::OutputFormatter;

/// Pretty-printed JSON of the whole report. Also used for `--export`.
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &Report) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
