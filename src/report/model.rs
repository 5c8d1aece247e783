//! Report assembly.
//!
//! One serde-serializable struct holding every section in the fixed
//! order the renderer emits them. Assembly is collection and shaping of
//! upstream results; nothing is computed here that is not a count or a
//! percentage of already-derived data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analysis::consistency::{ConsistencyReport, Verdict};
use crate::analysis::gaps::{GapAnalysis, ProposedSkill, WiringSuggestion};
use crate::analysis::health::ModuleHealth;
use crate::analysis::lessons::{LessonMapOutcome, LessonMapping, UnmappedLesson};
use crate::analysis::usage::UsageSummary;
use crate::graph::{SelfDependency, SkillGraph};
use crate::registry::{DependencyKind, EntityKind, Snapshot, Strength};

/// One cell of the dependency matrix: a declaration plus its verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixEntry {
    pub target: String,
    pub declared_kind: DependencyKind,
    pub strength: Strength,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// One declaring skill's row of the matrix, entries in declaration order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatrixRow {
    pub skill: String,
    pub entries: Vec<MatrixEntry>,
}

/// An error-level dangling reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingReference {
    pub skill: String,
    pub target: String,
    pub declared_kind: DependencyKind,
}

/// A declaration whose target exists only as another kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindMismatchEntry {
    pub skill: String,
    pub target: String,
    pub declared: DependencyKind,
    pub actual: EntityKind,
}

/// A declaration whose target exists as both a module and a skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbiguousReference {
    pub skill: String,
    pub target: String,
}

/// One orphan with its health numbers inlined for the orphan tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrphanEntry {
    pub name: String,
    pub health_score: u32,
    pub upgrade_priority: crate::analysis::health::UpgradePriority,
    pub lesson_count: usize,
}

/// Orphans of one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrphanSection {
    pub category: String,
    pub modules: Vec<OrphanEntry>,
}

/// The gap analyzer's suggestions, verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recommendations {
    pub proposed_skills: Vec<ProposedSkill>,
    pub wiring: Vec<WiringSuggestion>,
    pub no_wiring_candidate: Vec<String>,
}

/// Structural graph findings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphSection {
    pub self_dependencies: Vec<SelfDependency>,
    pub cycles: Vec<Vec<String>>,
}

/// Lesson mapping results carried for machine consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonSection {
    pub mappings: Vec<LessonMapping>,
    pub unmapped: Vec<UnmappedLesson>,
}

/// Closing counters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub total_skills: usize,
    pub total_modules: usize,
    pub total_code_blocks: usize,
    pub total_lessons: usize,
    pub edge_count: usize,
    pub orphan_count: usize,
    /// Percentage of modules with zero referring skills, one decimal.
    pub orphan_pct: f64,
    pub missing_count: usize,
    pub kind_mismatch_count: usize,
    pub ambiguous_count: usize,
    pub self_dependency_count: usize,
    pub cycle_count: usize,
    pub unmapped_lesson_count: usize,
}

/// The complete report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub matrix: Vec<MatrixRow>,
    pub usage: UsageSummary,
    pub missing: Vec<MissingReference>,
    pub kind_mismatches: Vec<KindMismatchEntry>,
    pub ambiguous: Vec<AmbiguousReference>,
    pub orphans: Vec<OrphanSection>,
    pub recommendations: Recommendations,
    pub health: Vec<ModuleHealth>,
    pub graph: GraphSection,
    pub lessons: LessonSection,
    pub summary: Summary,
}

impl Report {
    /// Assemble the report from the pipeline outputs.
    #[must_use]
    pub fn build(
        snapshot: &Snapshot,
        consistency: &ConsistencyReport,
        usage: UsageSummary,
        health: Vec<ModuleHealth>,
        gaps: GapAnalysis,
        lessons: LessonMapOutcome,
        graph: &SkillGraph,
    ) -> Self {
        let mut rows: BTreeMap<&str, Vec<MatrixEntry>> = BTreeMap::new();
        let mut missing = Vec::new();
        let mut kind_mismatches = Vec::new();
        let mut ambiguous = Vec::new();

        for resolved in &consistency.resolved {
            let edge = &resolved.edge;
            rows.entry(edge.skill_name.as_str())
                .or_default()
                .push(MatrixEntry {
                    target: edge.target_name.clone(),
                    declared_kind: edge.declared_kind,
                    strength: edge.strength,
                    verdict: resolved.verdict,
                });

            match resolved.verdict {
                Verdict::Missing => missing.push(MissingReference {
                    skill: edge.skill_name.clone(),
                    target: edge.target_name.clone(),
                    declared_kind: edge.declared_kind,
                }),
                Verdict::KindMismatch { declared, actual } => {
                    kind_mismatches.push(KindMismatchEntry {
                        skill: edge.skill_name.clone(),
                        target: edge.target_name.clone(),
                        declared,
                        actual,
                    });
                }
                Verdict::ResolvesToBoth => ambiguous.push(AmbiguousReference {
                    skill: edge.skill_name.clone(),
                    target: edge.target_name.clone(),
                }),
                Verdict::Resolved { .. } => {}
            }
        }

        let matrix = rows
            .into_iter()
            .map(|(skill, entries)| MatrixRow {
                skill: skill.to_string(),
                entries,
            })
            .collect();

        let health_by_name: BTreeMap<&str, &ModuleHealth> = health
            .iter()
            .map(|h| (h.module_name.as_str(), h))
            .collect();
        let orphans: Vec<OrphanSection> = gaps
            .orphans_by_category
            .iter()
            .map(|group| OrphanSection {
                category: group.category.clone(),
                modules: group
                    .modules
                    .iter()
                    .map(|name| {
                        let entry = health_by_name.get(name.as_str());
                        OrphanEntry {
                            name: name.clone(),
                            health_score: entry.map_or(100, |h| h.health_score),
                            upgrade_priority: entry.map_or(
                                crate::analysis::health::UpgradePriority::Low,
                                |h| h.upgrade_priority,
                            ),
                            lesson_count: entry.map_or(0, |h| h.lesson_count),
                        }
                    })
                    .collect(),
            })
            .collect();

        let orphan_count: usize = orphans.iter().map(|g| g.modules.len()).sum();
        let orphan_pct = if snapshot.module_count() == 0 {
            0.0
        } else {
            let raw = (orphan_count as f64 / snapshot.module_count() as f64) * 100.0;
            (raw * 10.0).round() / 10.0
        };

        let summary = Summary {
            total_skills: snapshot.skill_count(),
            total_modules: snapshot.module_count(),
            total_code_blocks: snapshot.code_block_count(),
            total_lessons: snapshot.lesson_count(),
            edge_count: snapshot.edges().len(),
            orphan_count,
            orphan_pct,
            missing_count: missing.len(),
            kind_mismatch_count: kind_mismatches.len(),
            ambiguous_count: ambiguous.len(),
            self_dependency_count: graph.self_dependencies().len(),
            cycle_count: graph.cycles().len(),
            unmapped_lesson_count: lessons.unmapped.len(),
        };

        Self {
            matrix,
            usage,
            missing,
            kind_mismatches,
            ambiguous,
            orphans,
            recommendations: Recommendations {
                proposed_skills: gaps.proposed_skills,
                wiring: gaps.wiring,
                no_wiring_candidate: gaps.no_wiring_candidate,
            },
            health,
            graph: GraphSection {
                self_dependencies: graph.self_dependencies().to_vec(),
                cycles: graph.cycles().to_vec(),
            },
            lessons: LessonSection {
                mappings: lessons.mappings,
                unmapped: lessons.unmapped,
            },
            summary,
        }
    }

    /// Serialize as the structured (machine) form.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
