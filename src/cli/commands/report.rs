//! sg report - run the full pipeline and emit the report.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{ReportFormat, use_color, write_output};
use crate::engine::Engine;
use crate::error::Result;
use crate::report::render_text;

#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Minimum orphan-cluster size for a proposed-skill recommendation
    #[arg(long, value_name = "N")]
    pub min_cluster_size: Option<usize>,

    /// Exit non-zero (2) if any missing reference is found
    #[arg(long)]
    pub fail_on_missing: bool,

    /// Write the report here instead of stdout
    #[arg(long, short = 'o', value_name = "PATH")]
    pub out: Option<PathBuf>,
}

pub fn run(ctx: &AppContext, args: &ReportArgs) -> Result<ExitCode> {
    let snapshot = ctx.load_snapshot()?;

    let mut options = ctx.engine_options();
    if let Some(size) = args.min_cluster_size {
        options = options.with_min_cluster_size(size);
    }

    let outcome = Engine::new(options).run(&snapshot);

    let content = match args.format {
        ReportFormat::Text => render_text(&outcome.report, use_color(args.out.as_deref())),
        ReportFormat::Structured => outcome.report.to_json()?,
    };
    write_output(args.out.as_deref(), &content)?;

    if args.fail_on_missing && outcome.has_missing() {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
