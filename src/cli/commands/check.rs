//! sg check - consistency findings only.

use std::process::ExitCode;

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::analysis::findings::{Finding, Severity};
use crate::app::AppContext;
use crate::cli::output::{MachineEnvelope, ReportFormat};
use crate::engine::Engine;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Exit non-zero (2) if any missing reference is found
    #[arg(long)]
    pub fail_on_missing: bool,
}

#[derive(Serialize)]
struct CheckData<'a> {
    findings: &'a [Finding],
    error_count: usize,
    warning_count: usize,
}

pub fn run(ctx: &AppContext, args: &CheckArgs) -> Result<ExitCode> {
    let snapshot = ctx.load_snapshot()?;
    let outcome = Engine::new(ctx.engine_options()).run(&snapshot);

    let error_count = outcome.findings.iter().filter(|f| f.is_error()).count();
    let warning_count = outcome.findings.len() - error_count;

    if args.format.is_machine_readable() {
        let envelope = MachineEnvelope::ok(CheckData {
            findings: &outcome.findings,
            error_count,
            warning_count,
        });
        println!("{}", envelope.to_json()?);
    } else if outcome.findings.is_empty() {
        println!("{}", "No findings: every reference resolves cleanly.".green());
    } else {
        for finding in &outcome.findings {
            let tag = match finding.severity {
                Severity::Error => "error".red().bold(),
                Severity::Warning => "warning".yellow(),
            };
            println!("{tag} [{}] {}", finding.kind, finding.message);
        }
        println!();
        println!("{error_count} error(s), {warning_count} warning(s)");
    }

    if args.fail_on_missing && outcome.has_missing() {
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
