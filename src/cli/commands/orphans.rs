//! sg orphans - orphan modules and gap recommendations.

use std::process::ExitCode;

use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{MachineEnvelope, ReportFormat};
use crate::engine::Engine;
use crate::error::Result;
use crate::report::model::{OrphanSection, Recommendations};

#[derive(Args, Debug)]
pub struct OrphansArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Minimum orphan-cluster size for a proposed-skill recommendation
    #[arg(long, value_name = "N")]
    pub min_cluster_size: Option<usize>,
}

#[derive(Serialize)]
struct OrphansData<'a> {
    orphans: &'a [OrphanSection],
    recommendations: &'a Recommendations,
}

pub fn run(ctx: &AppContext, args: &OrphansArgs) -> Result<ExitCode> {
    let snapshot = ctx.load_snapshot()?;

    let mut options = ctx.engine_options();
    if let Some(size) = args.min_cluster_size {
        options = options.with_min_cluster_size(size);
    }
    let outcome = Engine::new(options).run(&snapshot);
    let report = &outcome.report;

    if args.format.is_machine_readable() {
        let envelope = MachineEnvelope::ok(OrphansData {
            orphans: &report.orphans,
            recommendations: &report.recommendations,
        });
        println!("{}", envelope.to_json()?);
        return Ok(ExitCode::SUCCESS);
    }

    if report.orphans.is_empty() {
        println!("{}", "No orphan modules: every module has at least one referring skill.".green());
        return Ok(ExitCode::SUCCESS);
    }

    for group in &report.orphans {
        println!("{}", group.category.bold());
        for module in &group.modules {
            println!(
                "  {} (health {}, priority {})",
                module.name, module.health_score, module.upgrade_priority
            );
        }
    }

    let recs = &report.recommendations;
    if !recs.proposed_skills.is_empty() || !recs.wiring.is_empty() {
        println!();
        println!("{}", "Recommendations".bold());
        for proposal in &recs.proposed_skills {
            println!(
                "  propose new skill for '{}': {}",
                proposal.category,
                proposal.module_names.join(", ")
            );
        }
        for wiring in &recs.wiring {
            println!(
                "  wire '{}' into skill '{}'",
                wiring.module_name, wiring.skill_name
            );
        }
    }
    for name in &recs.no_wiring_candidate {
        println!("  '{name}': no wiring candidate");
    }

    Ok(ExitCode::SUCCESS)
}
