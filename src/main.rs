//! sg - skillgraph CLI
//!
//! Dependency-graph consistency and health scoring for skill registries.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use skillgraph::app::AppContext;
use skillgraph::cli::{Cli, Commands};
use skillgraph::error::Result;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            let structured = e.to_structured();
            eprintln!("Error[{}]: {}", structured.code, structured.message);
            if structured.recoverable {
                eprintln!("  hint: {}", structured.suggestion);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    if let Commands::Completions(args) = &cli.command {
        return skillgraph::cli::commands::completions::run(args);
    }
    let ctx = AppContext::from_cli(cli)?;
    skillgraph::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,skillgraph=info",
        1 => "info,skillgraph=debug",
        2 => "debug,skillgraph=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
