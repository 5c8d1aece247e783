//! Human-readable report rendering.
//!
//! Fixed section order per the report contract: matrix, usage ranking,
//! missing references, kind mismatches + ambiguous names, orphans with
//! health, recommendations, then the structural findings and unmapped
//! lessons, then summary counters.

use std::fmt::Write as _;

use colored::Colorize;

use super::model::Report;
use crate::analysis::consistency::Verdict;

/// Render the full text report. `color` should be false when the output
/// is not a terminal (e.g. `--out` to a file).
#[must_use]
pub fn render_text(report: &Report, color: bool) -> String {
    let mut out = String::new();

    heading(&mut out, "Dependency Matrix", color);
    if report.matrix.is_empty() {
        let _ = writeln!(out, "  (no dependency declarations)");
    }
    for row in &report.matrix {
        let _ = writeln!(out, "  {}", emphasize(&row.skill, color));
        for entry in &row.entries {
            let _ = writeln!(
                out,
                "    -> {} [{}, {}] {}",
                entry.target,
                entry.declared_kind,
                entry.strength.tag(),
                verdict_label(entry.verdict, color),
            );
        }
    }

    heading(&mut out, "Usage Ranking", color);
    if report.usage.modules.is_empty() {
        let _ = writeln!(out, "  (no modules)");
    }
    for usage in &report.usage.modules {
        let _ = writeln!(
            out,
            "  {:>4}  {}",
            usage.count,
            usage.module_name
        );
    }
    if !report.usage.skills.is_empty() {
        let _ = writeln!(out, "  skills used as dependencies:");
        for usage in &report.usage.skills {
            let _ = writeln!(out, "  {:>4}  {}", usage.count, usage.skill_name);
        }
    }

    heading(&mut out, "Missing References", color);
    if report.missing.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for missing in &report.missing {
        let _ = writeln!(
            out,
            "  {} -> {} (declared {})",
            missing.skill, missing.target, missing.declared_kind
        );
    }

    heading(&mut out, "Kind Mismatches", color);
    if report.kind_mismatches.is_empty() && report.ambiguous.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for mismatch in &report.kind_mismatches {
        let _ = writeln!(
            out,
            "  {} -> {} (declared {}, exists as {})",
            mismatch.skill, mismatch.target, mismatch.declared, mismatch.actual
        );
    }
    for ambiguous in &report.ambiguous {
        let _ = writeln!(
            out,
            "  {} -> {} (exists as both module and skill)",
            ambiguous.skill, ambiguous.target
        );
    }

    heading(&mut out, "Orphan Modules", color);
    if report.orphans.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for group in &report.orphans {
        let _ = writeln!(out, "  {}:", emphasize(&group.category, color));
        for module in &group.modules {
            let _ = writeln!(
                out,
                "    {} (health {}, priority {}, {} lessons)",
                module.name, module.health_score, module.upgrade_priority, module.lesson_count
            );
        }
    }

    heading(&mut out, "Recommendations", color);
    let recs = &report.recommendations;
    if recs.proposed_skills.is_empty()
        && recs.wiring.is_empty()
        && recs.no_wiring_candidate.is_empty()
    {
        let _ = writeln!(out, "  (none)");
    }
    for proposal in &recs.proposed_skills {
        let _ = writeln!(
            out,
            "  propose new skill for '{}': {}",
            proposal.category,
            proposal.module_names.join(", ")
        );
    }
    for wiring in &recs.wiring {
        let _ = writeln!(
            out,
            "  wire '{}' into skill '{}' ({} existing {} deps)",
            wiring.module_name, wiring.skill_name, wiring.shared_category_deps, wiring.category
        );
    }
    for name in &recs.no_wiring_candidate {
        let _ = writeln!(out, "  '{name}': no wiring candidate");
    }

    heading(&mut out, "Module Health", color);
    for health in &report.health {
        let _ = writeln!(
            out,
            "  {:>3}  {:<8}  {} ({} lessons, {} refs)",
            health.health_score,
            health.upgrade_priority.to_string(),
            health.module_name,
            health.lesson_count,
            health.skill_ref_count
        );
    }

    if !report.graph.self_dependencies.is_empty() || !report.graph.cycles.is_empty() {
        heading(&mut out, "Graph Findings", color);
        for dep in &report.graph.self_dependencies {
            let _ = writeln!(
                out,
                "  self-dependency: {} ({})",
                dep.skill_name, dep.declared_kind
            );
        }
        for cycle in &report.graph.cycles {
            let _ = writeln!(out, "  cycle: {}", cycle.join(" -> "));
        }
    }

    if !report.lessons.unmapped.is_empty() {
        heading(&mut out, "Unmapped Lessons", color);
        for lesson in &report.lessons.unmapped {
            let _ = writeln!(out, "  {} ({})", lesson.title, lesson.lesson_id);
        }
    }

    heading(&mut out, "Summary", color);
    let s = &report.summary;
    let _ = writeln!(out, "  skills:             {}", s.total_skills);
    let _ = writeln!(out, "  modules:            {}", s.total_modules);
    let _ = writeln!(out, "  code blocks:        {}", s.total_code_blocks);
    let _ = writeln!(out, "  lessons:            {}", s.total_lessons);
    let _ = writeln!(out, "  dependency edges:   {}", s.edge_count);
    let _ = writeln!(
        out,
        "  orphan modules:     {} ({:.1}%)",
        s.orphan_count, s.orphan_pct
    );
    let _ = writeln!(out, "  missing references: {}", s.missing_count);
    let _ = writeln!(out, "  kind mismatches:    {}", s.kind_mismatch_count);
    let _ = writeln!(out, "  ambiguous names:    {}", s.ambiguous_count);
    let _ = writeln!(out, "  unmapped lessons:   {}", s.unmapped_lesson_count);

    out
}

fn heading(out: &mut String, title: &str, color: bool) {
    if !out.is_empty() {
        let _ = writeln!(out);
    }
    if color {
        let _ = writeln!(out, "{}", title.bold().cyan());
    } else {
        let _ = writeln!(out, "{title}");
    }
    let _ = writeln!(out, "{}", "=".repeat(title.len()));
}

fn emphasize(text: &str, color: bool) -> String {
    if color {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

fn verdict_label(verdict: Verdict, color: bool) -> String {
    match verdict {
        Verdict::Resolved { .. } => {
            if color {
                "ok".green().to_string()
            } else {
                "ok".to_string()
            }
        }
        Verdict::KindMismatch { actual, .. } => {
            let label = format!("kind-mismatch (exists as {actual})");
            if color {
                label.yellow().to_string()
            } else {
                label
            }
        }
        Verdict::ResolvesToBoth => {
            if color {
                "ambiguous".yellow().to_string()
            } else {
                "ambiguous".to_string()
            }
        }
        Verdict::Missing => {
            if color {
                "MISSING".red().bold().to_string()
            } else {
                "MISSING".to_string()
            }
        }
    }
}
