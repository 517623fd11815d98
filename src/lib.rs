pub mod checker;
pub mod cli;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod output;
pub mod path_utils;
pub mod report;
pub mod scanner;

pub use engine::{run_full_validation, run_violations_only};
pub use error::{LayoutGuardError, Result};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_VIOLATIONS_FOUND: i32 = 1;
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
