//! Dependency multigraph over snapshot names.
//!
//! Nodes are display names; edges are the raw dependency declarations
//! annotated with strength and declared kind. Duplicate declarations stay
//! (it is a multigraph) and self-edges stay but are flagged. Cross-skill
//! cycles are reported as findings and never block the run; the engine
//! performs no execution ordering over skills.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::findings::{Finding, FindingKind};
use crate::registry::{DependencyKind, Snapshot, Strength};

/// One edge of the multigraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: String,
    pub to: String,
    pub declared_kind: DependencyKind,
    pub strength: Strength,
}

/// The built graph plus the structural findings discovered while
/// building it. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct SkillGraph {
    edges: Vec<GraphEdge>,
    /// Declared target names per skill, any kind. Used by the gap
    /// analyzer's "already appear together" test.
    targets_by_skill: HashMap<String, HashSet<String>>,
    /// Skill→skill adjacency restricted to targets that exist as skills;
    /// this is the subgraph cycles are detected on.
    skill_adjacency: HashMap<String, Vec<String>>,
    self_dependencies: Vec<SelfDependency>,
    cycles: Vec<Vec<String>>,
}

/// A skill declaring a dependency on its own name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelfDependency {
    pub skill_name: String,
    pub declared_kind: DependencyKind,
}

impl SkillGraph {
    /// Build the graph from the snapshot's raw edges.
    #[must_use]
    pub fn build(snapshot: &Snapshot) -> Self {
        let mut graph = Self::default();

        for edge in snapshot.edges() {
            graph
                .targets_by_skill
                .entry(edge.skill_name.clone())
                .or_default()
                .insert(edge.target_name.clone());

            if edge.target_name == edge.skill_name {
                graph.self_dependencies.push(SelfDependency {
                    skill_name: edge.skill_name.clone(),
                    declared_kind: edge.declared_kind,
                });
            }

            if edge.declared_kind == DependencyKind::Skill
                && snapshot.has_skill(&edge.target_name)
                && edge.target_name != edge.skill_name
            {
                graph
                    .skill_adjacency
                    .entry(edge.skill_name.clone())
                    .or_default()
                    .push(edge.target_name.clone());
            }

            graph.edges.push(GraphEdge {
                from: edge.skill_name.clone(),
                to: edge.target_name.clone(),
                declared_kind: edge.declared_kind,
                strength: edge.strength,
            });
        }

        for targets in graph.skill_adjacency.values_mut() {
            targets.sort();
            targets.dedup();
        }

        graph.cycles = graph.detect_cycles();
        graph
    }

    #[must_use]
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// All target names a skill declares, regardless of kind.
    #[must_use]
    pub fn declared_targets(&self, skill_name: &str) -> Option<&HashSet<String>> {
        self.targets_by_skill.get(skill_name)
    }

    #[must_use]
    pub fn self_dependencies(&self) -> &[SelfDependency] {
        &self.self_dependencies
    }

    /// Distinct skill→skill cycles, each rotated to start at its
    /// lexicographically smallest member.
    #[must_use]
    pub fn cycles(&self) -> &[Vec<String>] {
        &self.cycles
    }

    /// The structural findings as report-ready data.
    #[must_use]
    pub fn findings(&self) -> Vec<Finding> {
        let mut out = Vec::new();
        for dep in &self.self_dependencies {
            out.push(
                Finding::new(
                    FindingKind::SelfDependency,
                    format!(
                        "skill '{}' declares a {} dependency on itself",
                        dep.skill_name, dep.declared_kind
                    ),
                )
                .with_skill(dep.skill_name.clone())
                .with_target(dep.skill_name.clone()),
            );
        }
        for cycle in &self.cycles {
            out.push(Finding::new(
                FindingKind::CyclicSkillDependency,
                format!("skill dependency cycle: {}", cycle.join(" -> ")),
            ));
        }
        out
    }

    /// Iterative DFS with an explicit stack; back-edges into the current
    /// path yield cycles. Each distinct cycle is normalized (rotated to
    /// its smallest member) and deduplicated so output is stable across
    /// runs regardless of hash iteration order.
    fn detect_cycles(&self) -> Vec<Vec<String>> {
        let mut roots: Vec<&String> = self.skill_adjacency.keys().collect();
        roots.sort();

        let mut visited: HashSet<&str> = HashSet::new();
        let mut seen_cycles: HashSet<Vec<String>> = HashSet::new();
        let mut cycles = Vec::new();

        for root in roots {
            if visited.contains(root.as_str()) {
                continue;
            }
            // Stack entries are (node, next-child-index); path tracks the
            // current DFS chain for back-edge extraction.
            visited.insert(root.as_str());
            let mut stack: Vec<(&str, usize)> = vec![(root.as_str(), 0)];
            let mut path: Vec<&str> = vec![root.as_str()];
            let mut on_path: HashSet<&str> = HashSet::from([root.as_str()]);

            while let Some(frame) = stack.last_mut() {
                let node = frame.0;
                let child_idx = frame.1;
                frame.1 += 1;

                let children = self
                    .skill_adjacency
                    .get(node)
                    .map(Vec::as_slice)
                    .unwrap_or_default();

                match children.get(child_idx) {
                    Some(child) if on_path.contains(child.as_str()) => {
                        if let Some(start) = path.iter().position(|n| *n == child.as_str()) {
                            let cycle = normalize_cycle(&path[start..]);
                            if seen_cycles.insert(cycle.clone()) {
                                cycles.push(cycle);
                            }
                        }
                    }
                    Some(child) if !visited.contains(child.as_str()) => {
                        visited.insert(child.as_str());
                        on_path.insert(child.as_str());
                        path.push(child.as_str());
                        stack.push((child.as_str(), 0));
                    }
                    Some(_) => {}
                    None => {
                        on_path.remove(node);
                        path.pop();
                        stack.pop();
                    }
                }
            }
        }

        cycles.sort();
        cycles
    }
}

/// Rotate a cycle so it starts at its lexicographically smallest member.
fn normalize_cycle(cycle: &[&str]) -> Vec<String> {
    let Some(min_pos) = cycle
        .iter()
        .enumerate()
        .min_by_key(|(_, name)| **name)
        .map(|(pos, _)| pos)
    else {
        return Vec::new();
    };
    cycle[min_pos..]
        .iter()
        .chain(cycle[..min_pos].iter())
        .map(ToString::to_string)
        .collect()
}
