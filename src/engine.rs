//! The analysis pipeline.
//!
//! A full run is a single pure pass over an immutable snapshot. The
//! graph→consistency→usage chain and the lesson mapper have no data
//! dependency on each other, so they fork under `rayon::join`; health
//! waits on both, gaps waits on health's inputs, and report assembly
//! joins everything. No component mutates another's output, and the
//! engine holds no cross-run state; rerunning on the same snapshot
//! yields identical output.

use tracing::{debug, info};

use crate::analysis::consistency::{self, ConsistencyReport};
use crate::analysis::findings::Finding;
use crate::analysis::gaps;
use crate::analysis::health::{self, ScoringPolicy};
use crate::analysis::lessons::{self, LessonPolicy};
use crate::analysis::usage;
use crate::config::Config;
use crate::graph::SkillGraph;
use crate::registry::Snapshot;
use crate::report::Report;

/// Everything tunable about a run.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub scoring: ScoringPolicy,
    pub lesson_policy: LessonPolicy,
    pub min_cluster_size: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            scoring: ScoringPolicy::default(),
            lesson_policy: LessonPolicy::default(),
            min_cluster_size: 4,
        }
    }
}

impl EngineOptions {
    /// Derive options from loaded config.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            scoring: config.scoring.to_policy(),
            lesson_policy: config.lessons.to_policy(),
            min_cluster_size: config.analyzer.min_cluster_size,
        }
    }

    /// CLI override for the clustering threshold.
    #[must_use]
    pub fn with_min_cluster_size(mut self, size: usize) -> Self {
        self.min_cluster_size = size;
        self
    }
}

/// A completed run: the report plus the merged findings list.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub report: Report,
    pub findings: Vec<Finding>,
}

impl AnalysisOutcome {
    /// Whether any error-level (`Missing`) finding was produced; drives
    /// the `--fail-on-missing` exit status.
    #[must_use]
    pub fn has_missing(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }
}

/// The pipeline runner.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    options: EngineOptions,
}

impl Engine {
    #[must_use]
    pub fn new(options: EngineOptions) -> Self {
        Self { options }
    }

    /// Run the full pipeline over one snapshot.
    #[must_use]
    pub fn run(&self, snapshot: &Snapshot) -> AnalysisOutcome {
        let ((graph, consistency), lesson_outcome) = rayon::join(
            || {
                let graph = SkillGraph::build(snapshot);
                let consistency = consistency::check(snapshot);
                (graph, consistency)
            },
            || lessons::map_lessons(snapshot, &self.options.lesson_policy),
        );

        let usage_summary = usage::aggregate(snapshot, &consistency.resolved);
        let module_health = health::assess(
            snapshot,
            &usage_summary,
            &lesson_outcome,
            &self.options.scoring,
        );
        let gap_analysis = gaps::analyze(
            snapshot,
            &usage_summary,
            &consistency.resolved,
            &graph,
            self.options.min_cluster_size,
        );

        let findings = merge_findings(&graph, &consistency);
        debug!(
            edges = consistency.resolved.len(),
            findings = findings.len(),
            orphans = usage_summary.orphan_modules().len(),
            "analysis complete"
        );

        let report = Report::build(
            snapshot,
            &consistency,
            usage_summary,
            module_health,
            gap_analysis,
            lesson_outcome,
            &graph,
        );

        info!(
            skills = report.summary.total_skills,
            modules = report.summary.total_modules,
            missing = report.summary.missing_count,
            "report assembled"
        );

        AnalysisOutcome { report, findings }
    }
}

/// Merge the per-component finding lists in a stable order: structural
/// findings first, then resolution findings in declaration order.
fn merge_findings(graph: &SkillGraph, consistency: &ConsistencyReport) -> Vec<Finding> {
    let mut findings = graph.findings();
    findings.extend(consistency.findings.iter().cloned());
    findings
}
