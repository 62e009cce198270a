//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Fieldmap CLI - Suggest schema field mappings from the command line.
#[derive(Debug, Parser)]
#[command(name = "fieldmap")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run a mapping request file through the suggestion pipeline
    Suggest(SuggestArgs),

    /// Show the score breakdown of one source/target pair
    Explain(ExplainArgs),
}

/// Arguments for the suggest command.
#[derive(Debug, Parser)]
pub struct SuggestArgs {
    /// Request file (same JSON body as the HTTP endpoint)
    pub request: PathBuf,

    /// Server configuration file (provider, store, weights)
    #[arg(short, long, env = "FIELDMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Candidates shown per source field in table output
    #[arg(short = 'n', long, default_value = "3")]
    pub top: usize,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: CliFormat,
}

/// Arguments for the explain command.
#[derive(Debug, Parser)]
pub struct ExplainArgs {
    /// Source field name
    #[arg(long)]
    pub source: String,

    /// Source field type
    #[arg(long)]
    pub source_type: String,

    /// Source field dotted path
    #[arg(long)]
    pub source_path: Option<String>,

    /// Source semantic tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub source_tags: Vec<String>,

    /// Target field dotted path
    #[arg(long)]
    pub target_path: String,

    /// Target field type
    #[arg(long)]
    pub target_type: String,

    /// Target semantic tags (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub target_tags: Vec<String>,

    /// Target document type
    #[arg(long, default_value = "")]
    pub target_document: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: CliFormat,
}
