//! Orphan clustering and wiring recommendations.
//!
//! Orphans (zero-usage modules) cluster by category; a big-enough
//! cluster that no single skill already covers becomes a proposed new
//! skill, and the rest get a best-existing-skill wiring suggestion. Pure
//! heuristics over derived data; nothing here mutates the registry.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::consistency::ResolvedEdge;
use super::usage::UsageSummary;
use crate::graph::SkillGraph;
use crate::registry::Snapshot;

/// Category bucket used when a module record carries no category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Orphan modules sharing one category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrphanGroup {
    pub category: String,
    pub modules: Vec<String>,
}

/// A recommended new skill consolidating an orphan cluster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposedSkill {
    pub category: String,
    pub module_names: Vec<String>,
}

/// A recommended wiring of one orphan into an existing skill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WiringSuggestion {
    pub module_name: String,
    pub category: String,
    pub skill_name: String,
    /// How many same-category modules the skill already depends on.
    pub shared_category_deps: usize,
}

/// The analyzer's full output.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub orphans_by_category: Vec<OrphanGroup>,
    pub proposed_skills: Vec<ProposedSkill>,
    pub wiring: Vec<WiringSuggestion>,
    /// Orphans with neither a cluster nor a wiring candidate.
    pub no_wiring_candidate: Vec<String>,
}

/// Run the analysis. `min_cluster_size` is the clustering threshold
/// (CLI/config tunable, default 4).
#[must_use]
pub fn analyze(
    snapshot: &Snapshot,
    usage: &UsageSummary,
    resolved: &[ResolvedEdge],
    graph: &SkillGraph,
    min_cluster_size: usize,
) -> GapAnalysis {
    let orphans = usage.orphan_modules();

    // Group orphans by category, sorted both ways for determinism.
    let mut by_category: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for name in &orphans {
        let category = snapshot
            .module(name)
            .map(|m| m.category.trim())
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED)
            .to_string();
        by_category.entry(category).or_default().push((*name).to_string());
    }
    for members in by_category.values_mut() {
        members.sort();
    }

    // Same-category resolved-module dependency counts per skill, for
    // wiring candidate scoring.
    let mut category_deps: HashMap<(&str, &str), usize> = HashMap::new();
    for edge in resolved {
        if !edge.verdict.is_resolved_module() {
            continue;
        }
        let Some(module) = snapshot.module(&edge.edge.target_name) else {
            continue;
        };
        let category = if module.category.trim().is_empty() {
            UNCATEGORIZED
        } else {
            module.category.as_str()
        };
        *category_deps
            .entry((edge.edge.skill_name.as_str(), category))
            .or_default() += 1;
    }

    let mut proposed_skills = Vec::new();
    let mut wiring = Vec::new();
    let mut no_wiring_candidate = Vec::new();

    for (category, members) in &by_category {
        if members.len() >= min_cluster_size && !already_covered(snapshot, graph, members) {
            proposed_skills.push(ProposedSkill {
                category: category.clone(),
                module_names: members.clone(),
            });
            continue;
        }

        for module_name in members {
            match best_wiring(snapshot, &category_deps, category) {
                Some((skill_name, shared)) => wiring.push(WiringSuggestion {
                    module_name: module_name.clone(),
                    category: category.clone(),
                    skill_name,
                    shared_category_deps: shared,
                }),
                None => no_wiring_candidate.push(module_name.clone()),
            }
        }
    }

    no_wiring_candidate.sort();

    GapAnalysis {
        orphans_by_category: by_category
            .into_iter()
            .map(|(category, modules)| OrphanGroup { category, modules })
            .collect(),
        proposed_skills,
        wiring,
        no_wiring_candidate,
    }
}

/// True when some single existing skill already declares every cluster
/// member as a dependency target. Checked against *declared* targets,
/// so a skill that already lists the whole cluster suppresses the
/// proposal even while those declarations misresolve.
fn already_covered(snapshot: &Snapshot, graph: &SkillGraph, members: &[String]) -> bool {
    snapshot.skills_sorted().iter().any(|skill| {
        graph
            .declared_targets(&skill.name)
            .is_some_and(|targets| members.iter().all(|m| targets.contains(m)))
    })
}

/// Highest same-category dependency count wins; ties go to the
/// lexicographically smallest skill name. Zero-score candidates are no
/// candidates at all.
fn best_wiring(
    snapshot: &Snapshot,
    category_deps: &HashMap<(&str, &str), usize>,
    category: &str,
) -> Option<(String, usize)> {
    let mut best: Option<(&str, usize)> = None;
    for skill in snapshot.skills_sorted() {
        let score = category_deps
            .get(&(skill.name.as_str(), category))
            .copied()
            .unwrap_or(0);
        if score == 0 {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, best_score)) => score > best_score,
        };
        if better {
            best = Some((skill.name.as_str(), score));
        }
    }
    best.map(|(name, score)| (name.to_string(), score))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::consistency::check;
    use crate::analysis::usage::aggregate;
    use crate::registry::{RegistryExport, build_snapshot};

    fn run(json: &str, min_cluster_size: usize) -> GapAnalysis {
        let export: RegistryExport = serde_json::from_str(json).unwrap();
        let snapshot = build_snapshot(export).unwrap();
        let consistency = check(&snapshot);
        let usage = aggregate(&snapshot, &consistency.resolved);
        let graph = SkillGraph::build(&snapshot);
        analyze(&snapshot, &usage, &consistency.resolved, &graph, min_cluster_size)
    }

    #[test]
    fn test_cluster_proposed_at_threshold() {
        // Five mobile-ux orphans, no skill touching any of them: one
        // proposal naming all five.
        let analysis = run(
            r#"{
                "skills": [{"id": "s-1", "name": "unrelated"}],
                "modules": [
                    {"id": "m-1", "name": "swipe-nav", "category": "mobile-ux"},
                    {"id": "m-2", "name": "haptic-feedback", "category": "mobile-ux"},
                    {"id": "m-3", "name": "pull-refresh", "category": "mobile-ux"},
                    {"id": "m-4", "name": "bottom-sheet", "category": "mobile-ux"},
                    {"id": "m-5", "name": "gesture-zoom", "category": "mobile-ux"}
                ]
            }"#,
            4,
        );
        assert_eq!(analysis.proposed_skills.len(), 1);
        let proposal = &analysis.proposed_skills[0];
        assert_eq!(proposal.category, "mobile-ux");
        assert_eq!(proposal.module_names.len(), 5);
        assert!(analysis.wiring.is_empty());
    }

    #[test]
    fn test_cluster_below_threshold_not_proposed() {
        let analysis = run(
            r#"{
                "modules": [
                    {"id": "m-1", "name": "a", "category": "email"},
                    {"id": "m-2", "name": "b", "category": "email"},
                    {"id": "m-3", "name": "c", "category": "email"}
                ]
            }"#,
            4,
        );
        assert!(analysis.proposed_skills.is_empty());
        // No skill shares the category either.
        assert_eq!(analysis.no_wiring_candidate, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_min_cluster_size_tunable() {
        let analysis = run(
            r#"{
                "modules": [
                    {"id": "m-1", "name": "a", "category": "email"},
                    {"id": "m-2", "name": "b", "category": "email"}
                ]
            }"#,
            2,
        );
        assert_eq!(analysis.proposed_skills.len(), 1);
    }

    #[test]
    fn test_cluster_suppressed_when_one_skill_lists_all() {
        let analysis = run(
            r#"{
                "skills": [{"id": "s-1", "name": "mega-skill"}],
                "modules": [
                    {"id": "m-1", "name": "a", "category": "seo"},
                    {"id": "m-2", "name": "b", "category": "seo"},
                    {"id": "m-3", "name": "c", "category": "seo"},
                    {"id": "m-4", "name": "d", "category": "seo"}
                ],
                "skill_deps": [
                    {"skill_id": "s-1", "target": "a"},
                    {"skill_id": "s-1", "target": "b"},
                    {"skill_id": "s-1", "target": "c"},
                    {"skill_id": "s-1", "target": "d"}
                ]
            }"#,
            4,
        );
        // The declarations misresolve (kind mismatch), so the modules
        // stay orphans, but the cluster is already covered by mega-skill.
        assert!(analysis.proposed_skills.is_empty());
        assert_eq!(analysis.orphans_by_category.len(), 1);
    }

    #[test]
    fn test_wiring_prefers_highest_category_overlap() {
        let analysis = run(
            r#"{
                "skills": [
                    {"id": "s-1", "name": "heavy-email-skill"},
                    {"id": "s-2", "name": "light-email-skill"}
                ],
                "modules": [
                    {"id": "m-1", "name": "smtp-pool", "category": "email"},
                    {"id": "m-2", "name": "dkim-signer", "category": "email"},
                    {"id": "m-3", "name": "bounce-parser", "category": "email"},
                    {"id": "m-4", "name": "list-cleaner", "category": "email"}
                ],
                "module_deps": [
                    {"skill_id": "s-1", "target": "smtp-pool"},
                    {"skill_id": "s-1", "target": "dkim-signer"},
                    {"skill_id": "s-2", "target": "bounce-parser"}
                ]
            }"#,
            4,
        );
        // Only list-cleaner is an orphan (cluster of 1 < 4).
        assert!(analysis.proposed_skills.is_empty());
        assert_eq!(analysis.wiring.len(), 1);
        let suggestion = &analysis.wiring[0];
        assert_eq!(suggestion.module_name, "list-cleaner");
        assert_eq!(suggestion.skill_name, "heavy-email-skill");
        assert_eq!(suggestion.shared_category_deps, 2);
    }

    #[test]
    fn test_wiring_tie_breaks_lexicographically() {
        let analysis = run(
            r#"{
                "skills": [
                    {"id": "s-1", "name": "zeta-skill"},
                    {"id": "s-2", "name": "alpha-skill"}
                ],
                "modules": [
                    {"id": "m-1", "name": "used-1", "category": "cms"},
                    {"id": "m-2", "name": "used-2", "category": "cms"},
                    {"id": "m-3", "name": "stray", "category": "cms"}
                ],
                "module_deps": [
                    {"skill_id": "s-1", "target": "used-1"},
                    {"skill_id": "s-2", "target": "used-2"}
                ]
            }"#,
            4,
        );
        assert_eq!(analysis.wiring.len(), 1);
        assert_eq!(analysis.wiring[0].skill_name, "alpha-skill");
    }

    #[test]
    fn test_uncategorized_bucket() {
        let analysis = run(
            r#"{
                "modules": [{"id": "m-1", "name": "drifter"}]
            }"#,
            4,
        );
        assert_eq!(analysis.orphans_by_category.len(), 1);
        assert_eq!(analysis.orphans_by_category[0].category, UNCATEGORIZED);
        assert_eq!(analysis.no_wiring_candidate, vec!["drifter"]);
    }
}
