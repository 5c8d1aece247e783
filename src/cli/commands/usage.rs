//! sg usage - module and skill usage ranking.

use std::process::ExitCode;

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{MachineEnvelope, ReportFormat};
use crate::engine::Engine;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct UsageArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Maximum number of rows per ranking
    #[arg(long, short = 'n', default_value = "50")]
    pub limit: usize,
}

pub fn run(ctx: &AppContext, args: &UsageArgs) -> Result<ExitCode> {
    let snapshot = ctx.load_snapshot()?;
    let outcome = Engine::new(ctx.engine_options()).run(&snapshot);
    let usage = &outcome.report.usage;

    if args.format.is_machine_readable() {
        let envelope = MachineEnvelope::ok(usage);
        println!("{}", envelope.to_json()?);
        return Ok(ExitCode::SUCCESS);
    }

    println!("{}", "Module usage".bold());
    if usage.modules.is_empty() {
        println!("  (no modules)");
    }
    for row in usage.modules.iter().take(args.limit) {
        println!("  {:>4}  {}", row.count, row.module_name);
    }

    if !usage.skills.is_empty() {
        println!();
        println!("{}", "Skills used as dependencies".bold());
        for row in usage.skills.iter().take(args.limit) {
            println!("  {:>4}  {}", row.count, row.skill_name);
        }
    }

    Ok(ExitCode::SUCCESS)
}
