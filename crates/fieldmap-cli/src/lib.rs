//! Fieldmap CLI library.
//!
//! Runs the mapping pipeline in-process: argument parsing, command
//! execution and output formatting.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat, Command};
pub use error::{CliError, Result};
pub use output::Formatter;
