//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, form::FormCommands, init::InitArgs, respond::RespondArgs,
    responses::ResponsesArgs, summary::SummaryArgs,
};

#[derive(Parser)]
#[command(name = "tally")]
#[command(author, version, about = "Tally Form Toolkit")]
#[command(
    long_about = "A toolkit for composing data-collection forms and gathering validated responses as plain text files."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Workspace root (default: auto-detect by finding .tally/)
    #[arg(long, global = true)]
    pub workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new Tally workspace
    Init(InitArgs),

    /// Form schema management
    #[command(subcommand)]
    Form(FormCommands),

    /// Answer a form and submit the response
    Respond(RespondArgs),

    /// List submitted responses
    Responses(ResponsesArgs),

    /// Show aggregate response statistics
    Summary(SummaryArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (yaml for show, tsv for list)
    #[default]
    Auto,
    /// YAML format (full fidelity)
    Yaml,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Just IDs, one per line
    Id,
}
