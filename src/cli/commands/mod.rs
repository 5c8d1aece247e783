//! Command handlers. One file per command; each exposes
//! `run(ctx, args) -> Result<ExitCode>` so `--fail-on-missing` can turn
//! findings into exit status 2 without threading errors through.

use std::process::ExitCode;

use crate::app::AppContext;
use crate::cli::Commands;
use crate::error::Result;

pub mod check;
pub mod completions;
pub mod lessons;
pub mod orphans;
pub mod report;
pub mod usage;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<ExitCode> {
    match command {
        Commands::Report(args) => report::run(ctx, args),
        Commands::Check(args) => check::run(ctx, args),
        Commands::Usage(args) => usage::run(ctx, args),
        Commands::Orphans(args) => orphans::run(ctx, args),
        Commands::Lessons(args) => lessons::run(ctx, args),
        Commands::Completions(args) => completions::run(args),
    }
}
