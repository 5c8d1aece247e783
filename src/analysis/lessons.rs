//! Lesson relevance mapping.
//!
//! Each lesson arrives with a pre-tagged set of candidate target names.
//! The mapper resolves those against the module and skill namespaces,
//! classifies relevance from the lesson's category, and guarantees one
//! row per (lesson, target) pair. Lessons whose targets all fail to
//! resolve are reported as unmapped; advisory, since a lesson may be
//! general-purpose.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::registry::{DependencyKind, Lesson, Snapshot};

/// How strongly a lesson bears on its target. Ordered so deduplication
/// can keep the higher of two classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relevance {
    Informational,
    Actionable,
    Critical,
}

impl std::fmt::Display for Relevance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Informational => write!(f, "informational"),
            Self::Actionable => write!(f, "actionable"),
            Self::Critical => write!(f, "critical"),
        }
    }
}

/// One classified (lesson, target) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonMapping {
    pub lesson_id: String,
    pub target_name: String,
    pub target_kind: DependencyKind,
    pub relevance: Relevance,
    pub action_needed: bool,
}

/// A lesson none of whose targets resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmappedLesson {
    pub lesson_id: String,
    pub title: String,
}

/// The mapper's output: deduplicated mappings sorted by
/// (lesson id, target name), plus the unmapped list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LessonMapOutcome {
    pub mappings: Vec<LessonMapping>,
    pub unmapped: Vec<UnmappedLesson>,
}

impl LessonMapOutcome {
    /// Number of module-targeted mappings for one module name; the
    /// health scorer's `lesson_count`.
    #[must_use]
    pub fn module_lesson_count(&self, module_name: &str) -> usize {
        self.mappings
            .iter()
            .filter(|m| m.target_kind == DependencyKind::Module && m.target_name == module_name)
            .count()
    }
}

/// Category sets driving relevance classification. Config-tunable; the
/// defaults mirror the categories the source catalog actually uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonPolicy {
    pub bugfix_categories: Vec<String>,
    pub actionable_categories: Vec<String>,
}

impl Default for LessonPolicy {
    fn default() -> Self {
        Self {
            bugfix_categories: vec![
                "bugfix".to_string(),
                "bug".to_string(),
                "hotfix".to_string(),
                "error-handling".to_string(),
                "regression".to_string(),
            ],
            actionable_categories: vec![
                "pattern".to_string(),
                "feature-gap".to_string(),
                "enhancement".to_string(),
                "integration".to_string(),
                "performance".to_string(),
            ],
        }
    }
}

impl LessonPolicy {
    fn is_bugfix(&self, category: &str) -> bool {
        self.bugfix_categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }

    fn is_actionable(&self, category: &str) -> bool {
        self.actionable_categories
            .iter()
            .any(|c| c.eq_ignore_ascii_case(category))
    }
}

/// Classify one lesson against one resolved target kind. Pure.
#[must_use]
pub fn classify(policy: &LessonPolicy, lesson: &Lesson, target_kind: DependencyKind) -> Relevance {
    if target_kind == DependencyKind::Module && policy.is_bugfix(&lesson.category) {
        Relevance::Critical
    } else if policy.is_actionable(&lesson.category) {
        Relevance::Actionable
    } else {
        Relevance::Informational
    }
}

/// Map every lesson. Duplicate (lesson, target) pairs collapse to one
/// row keeping the higher relevance.
#[must_use]
pub fn map_lessons(snapshot: &Snapshot, policy: &LessonPolicy) -> LessonMapOutcome {
    let mut rows: BTreeMap<(String, String), LessonMapping> = BTreeMap::new();
    let mut unmapped = Vec::new();

    for lesson in snapshot.lessons() {
        let mut mapped_any = false;

        for target in &lesson.targets {
            // A name present in both namespaces maps to the module side:
            // lessons ride on the scored namespace, and the ambiguity is
            // already surfaced by the consistency checker.
            let target_kind = if snapshot.has_module(target) {
                DependencyKind::Module
            } else if snapshot.has_skill(target) {
                DependencyKind::Skill
            } else {
                continue;
            };
            mapped_any = true;

            let relevance = classify(policy, lesson, target_kind);
            let key = (lesson.id.clone(), target.clone());
            rows.entry(key)
                .and_modify(|existing| {
                    if relevance > existing.relevance {
                        existing.relevance = relevance;
                        existing.action_needed = relevance != Relevance::Informational;
                    }
                })
                .or_insert_with(|| LessonMapping {
                    lesson_id: lesson.id.clone(),
                    target_name: target.clone(),
                    target_kind,
                    relevance,
                    action_needed: relevance != Relevance::Informational,
                });
        }

        if !mapped_any {
            unmapped.push(UnmappedLesson {
                lesson_id: lesson.id.clone(),
                title: lesson.title.clone(),
            });
        }
    }

    LessonMapOutcome {
        mappings: rows.into_values().collect(),
        unmapped,
    }
}
