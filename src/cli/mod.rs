//! CLI module - Command-line interface definitions and handlers
//!
//! Uses clap v4 with derive macros for argument parsing.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use output::ReportFormat;

pub mod commands;
pub mod output;

/// skillgraph - Dependency-graph consistency and health scoring for
/// skill registries
#[derive(Parser, Debug)]
#[command(name = "sg")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Registry export path (default: [registry].path from config,
    /// falling back to ./registry.json)
    #[arg(long, global = true, env = "SG_REGISTRY", value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Config file path (default: ~/.config/skillgraph/config.toml,
    /// then ./skillgraph.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline and emit the report
    Report(commands::report::ReportArgs),

    /// Consistency findings only (resolution verdicts)
    Check(commands::check::CheckArgs),

    /// Module and skill usage ranking
    Usage(commands::usage::UsageArgs),

    /// Orphan modules and gap recommendations
    Orphans(commands::orphans::OrphansArgs),

    /// Lesson mapping summary
    Lessons(commands::lessons::LessonsArgs),

    /// Generate shell completions
    Completions(commands::completions::CompletionsArgs),
}
