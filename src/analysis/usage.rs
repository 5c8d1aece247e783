//! Usage aggregation over resolved edges.
//!
//! Only cleanly resolved edges count: a mismatched or ambiguous
//! reference contributes nothing until it is cleaned up. Optional and
//! required strengths count identically (the source registry ranks "O"
//! and "D" the same); strength survives only for display in the matrix.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::consistency::ResolvedEdge;
use crate::registry::Snapshot;

/// Referring-skill set for one module. Every module in the snapshot gets
/// a row; `count == 0` marks an orphan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleUsage {
    pub module_name: String,
    pub referring_skill_ids: Vec<String>,
    pub count: usize,
}

/// Referring-skill set for a skill used as a dependency. Ranked for
/// display, never scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillUsage {
    pub skill_name: String,
    pub referring_skill_ids: Vec<String>,
    pub count: usize,
}

/// Aggregated usage, both namespaces, sorted by descending count with
/// name ascending as tie-break.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UsageSummary {
    pub modules: Vec<ModuleUsage>,
    pub skills: Vec<SkillUsage>,
}

impl UsageSummary {
    /// Lookup helper for downstream scoring.
    #[must_use]
    pub fn module_ref_count(&self, module_name: &str) -> usize {
        self.modules
            .iter()
            .find(|u| u.module_name == module_name)
            .map_or(0, |u| u.count)
    }

    /// Module names with zero referring skills.
    #[must_use]
    pub fn orphan_modules(&self) -> Vec<&str> {
        self.modules
            .iter()
            .filter(|u| u.count == 0)
            .map(|u| u.module_name.as_str())
            .collect()
    }
}

/// Fold resolved edges into per-name referring sets. Distinct skill ids
/// only: a skill listing the same module twice counts once.
#[must_use]
pub fn aggregate(snapshot: &Snapshot, resolved: &[ResolvedEdge]) -> UsageSummary {
    let mut module_refs: HashMap<&str, BTreeSet<&str>> = snapshot
        .modules_sorted()
        .iter()
        .map(|m| (m.name.as_str(), BTreeSet::new()))
        .collect();
    let mut skill_refs: HashMap<&str, BTreeSet<&str>> = HashMap::new();

    for edge in resolved {
        if edge.verdict.is_resolved_module() {
            module_refs
                .entry(edge.edge.target_name.as_str())
                .or_default()
                .insert(edge.edge.skill_id.as_str());
        } else if edge.verdict.is_resolved_skill() {
            skill_refs
                .entry(edge.edge.target_name.as_str())
                .or_default()
                .insert(edge.edge.skill_id.as_str());
        }
    }

    let mut modules: Vec<ModuleUsage> = module_refs
        .into_iter()
        .map(|(name, ids)| ModuleUsage {
            module_name: name.to_string(),
            count: ids.len(),
            referring_skill_ids: ids.into_iter().map(ToString::to_string).collect(),
        })
        .collect();
    modules.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.module_name.cmp(&b.module_name))
    });

    let mut skills: Vec<SkillUsage> = skill_refs
        .into_iter()
        .map(|(name, ids)| SkillUsage {
            skill_name: name.to_string(),
            count: ids.len(),
            referring_skill_ids: ids.into_iter().map(ToString::to_string).collect(),
        })
        .collect();
    skills.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.skill_name.cmp(&b.skill_name))
    });

    UsageSummary { modules, skills }
}
