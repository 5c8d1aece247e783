//! Module health scoring.
//!
//! Two deliberately decoupled outputs per module: a continuous health
//! score for ranking (lesson volume pulls it down, usage pulls it up)
//! and a coarse upgrade-priority tier computed from lesson volume alone,
//! so a module nobody uses yet still gets flagged when lessons pile up
//! against it. Both are pure functions of the current snapshot's derived
//! counts; recomputing yields identical values.

use serde::{Deserialize, Serialize};

use super::lessons::LessonMapOutcome;
use super::usage::UsageSummary;
use crate::registry::Snapshot;

/// Scoring constants. Policy configuration, not a law of nature; the
/// defaults are 2/3 weights and 50/25/10 tier thresholds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub lesson_weight: i64,
    pub usage_weight: i64,
    pub critical_threshold: usize,
    pub high_threshold: usize,
    pub medium_threshold: usize,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            lesson_weight: 2,
            usage_weight: 3,
            critical_threshold: 50,
            high_threshold: 25,
            medium_threshold: 10,
        }
    }
}

/// Discrete triage tier. Derived from lesson volume alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradePriority {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for UpgradePriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// Fully derived health record for one module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleHealth {
    pub module_name: String,
    pub lesson_count: usize,
    pub skill_ref_count: usize,
    pub health_score: u32,
    pub upgrade_priority: UpgradePriority,
}

/// `clamp(100 − lessons*lesson_weight + refs*usage_weight, 0, 100)`.
#[must_use]
pub fn health_score(policy: &ScoringPolicy, lesson_count: usize, skill_ref_count: usize) -> u32 {
    let raw = 100_i64 - (lesson_count as i64) * policy.lesson_weight
        + (skill_ref_count as i64) * policy.usage_weight;
    raw.clamp(0, 100) as u32
}

/// Tier from lesson volume alone; independent of usage by design.
#[must_use]
pub fn upgrade_priority(policy: &ScoringPolicy, lesson_count: usize) -> UpgradePriority {
    if lesson_count > policy.critical_threshold {
        UpgradePriority::Critical
    } else if lesson_count > policy.high_threshold {
        UpgradePriority::High
    } else if lesson_count > policy.medium_threshold {
        UpgradePriority::Medium
    } else {
        UpgradePriority::Low
    }
}

/// Score every module in the snapshot. Output sorted worst-first:
/// ascending score, ties broken by higher ref count (a heavily-used,
/// lesson-heavy module is the worse outlier), then by name.
#[must_use]
pub fn assess(
    snapshot: &Snapshot,
    usage: &UsageSummary,
    lessons: &LessonMapOutcome,
    policy: &ScoringPolicy,
) -> Vec<ModuleHealth> {
    let mut out: Vec<ModuleHealth> = snapshot
        .modules_sorted()
        .iter()
        .map(|module| {
            let lesson_count = lessons.module_lesson_count(&module.name);
            let skill_ref_count = usage.module_ref_count(&module.name);
            ModuleHealth {
                module_name: module.name.clone(),
                lesson_count,
                skill_ref_count,
                health_score: health_score(policy, lesson_count, skill_ref_count),
                upgrade_priority: upgrade_priority(policy, lesson_count),
            }
        })
        .collect();

    out.sort_by(|a, b| {
        a.health_score
            .cmp(&b.health_score)
            .then_with(|| b.skill_ref_count.cmp(&a.skill_ref_count))
            .then_with(|| a.module_name.cmp(&b.module_name))
    });
    out
}
