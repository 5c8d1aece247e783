//! sg lessons - lesson mapping summary.

use std::process::ExitCode;

use clap::Args;
use colored::Colorize;
use itertools::Itertools;

use crate::analysis::lessons::Relevance;
use crate::app::AppContext;
use crate::cli::output::{MachineEnvelope, ReportFormat};
use crate::engine::Engine;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct LessonsArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

pub fn run(ctx: &AppContext, args: &LessonsArgs) -> Result<ExitCode> {
    let snapshot = ctx.load_snapshot()?;
    let outcome = Engine::new(ctx.engine_options()).run(&snapshot);
    let lessons = &outcome.report.lessons;

    if args.format.is_machine_readable() {
        let envelope = MachineEnvelope::ok(lessons);
        println!("{}", envelope.to_json()?);
        return Ok(ExitCode::SUCCESS);
    }

    let tally = lessons.mappings.iter().counts_by(|m| m.relevance);

    println!("{}", "Lesson mappings".bold());
    println!(
        "  critical:      {}",
        tally.get(&Relevance::Critical).copied().unwrap_or(0)
    );
    println!(
        "  actionable:    {}",
        tally.get(&Relevance::Actionable).copied().unwrap_or(0)
    );
    println!(
        "  informational: {}",
        tally.get(&Relevance::Informational).copied().unwrap_or(0)
    );

    if !lessons.unmapped.is_empty() {
        println!();
        println!("{}", "Unmapped lessons".bold());
        for lesson in &lessons.unmapped {
            println!("  {} ({})", lesson.title, lesson.lesson_id);
        }
    }

    Ok(ExitCode::SUCCESS)
}
