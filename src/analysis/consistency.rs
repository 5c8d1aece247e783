//! Dependency reference resolution.
//!
//! Every raw edge gets exactly one verdict, computed purely from
//! (target name, declared kind, snapshot) with case-sensitive exact name
//! matching. No fuzzy matching happens here; the gap analyzer's wiring
//! heuristic is the only place similarity is used, and it never resolves
//! a reference.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::findings::{Finding, FindingKind};
use crate::registry::{DependencyEdge, DependencyKind, EntityKind, Snapshot};

/// Resolution verdict for one edge. Exactly one is assigned per edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The target exists only as the declared kind.
    Resolved { kind: EntityKind },
    /// The target exists, but only as a different kind than declared.
    KindMismatch {
        declared: DependencyKind,
        actual: EntityKind,
    },
    /// The target exists as both a module and a skill; ambiguous, never
    /// silently resolved.
    ResolvesToBoth,
    /// The target exists in no namespace.
    Missing,
}

impl Verdict {
    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    #[must_use]
    pub const fn resolved_kind(&self) -> Option<EntityKind> {
        match self {
            Self::Resolved { kind } => Some(*kind),
            _ => None,
        }
    }

    /// True when the edge cleanly resolves to a module.
    #[must_use]
    pub const fn is_resolved_module(&self) -> bool {
        matches!(
            self,
            Self::Resolved {
                kind: EntityKind::Module
            }
        )
    }

    /// True when the edge cleanly resolves to a skill.
    #[must_use]
    pub const fn is_resolved_skill(&self) -> bool {
        matches!(
            self,
            Self::Resolved {
                kind: EntityKind::Skill
            }
        )
    }
}

/// An edge with its resolution verdict. Derived, never authoritative;
/// recomputed every run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedEdge {
    #[serde(flatten)]
    pub edge: DependencyEdge,
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// The checker's output: every edge classified (in declaration order)
/// plus the findings derived from the non-happy verdicts.
#[derive(Debug, Clone, Default)]
pub struct ConsistencyReport {
    pub resolved: Vec<ResolvedEdge>,
    pub findings: Vec<Finding>,
}

/// Resolve one target name against the snapshot. Pure.
#[must_use]
pub fn resolve(snapshot: &Snapshot, target: &str, declared: DependencyKind) -> Verdict {
    let as_module = snapshot.has_module(target);
    let as_skill = snapshot.has_skill(target);

    match (as_module, as_skill) {
        (true, true) => Verdict::ResolvesToBoth,
        (true, false) => {
            if EntityKind::Module.satisfies(declared) {
                Verdict::Resolved {
                    kind: EntityKind::Module,
                }
            } else {
                Verdict::KindMismatch {
                    declared,
                    actual: EntityKind::Module,
                }
            }
        }
        (false, true) => {
            if EntityKind::Skill.satisfies(declared) {
                Verdict::Resolved {
                    kind: EntityKind::Skill,
                }
            } else {
                Verdict::KindMismatch {
                    declared,
                    actual: EntityKind::Skill,
                }
            }
        }
        (false, false) => {
            // The code-block namespace participates in resolution but can
            // never satisfy a module/skill declaration.
            if snapshot.has_code_block(target) {
                Verdict::KindMismatch {
                    declared,
                    actual: EntityKind::CodeBlock,
                }
            } else {
                Verdict::Missing
            }
        }
    }
}

/// Classify every edge. Per-edge resolution is independent and runs in
/// parallel; the indexed collect preserves declaration order, so the
/// output (and everything derived from it) is deterministic.
#[must_use]
pub fn check(snapshot: &Snapshot) -> ConsistencyReport {
    let resolved: Vec<ResolvedEdge> = snapshot
        .edges()
        .par_iter()
        .map(|edge| ResolvedEdge {
            verdict: resolve(snapshot, &edge.target_name, edge.declared_kind),
            edge: edge.clone(),
        })
        .collect();

    let findings = resolved.iter().filter_map(edge_finding).collect();

    ConsistencyReport { resolved, findings }
}

fn edge_finding(resolved: &ResolvedEdge) -> Option<Finding> {
    let edge = &resolved.edge;
    match resolved.verdict {
        Verdict::Resolved { .. } => None,
        Verdict::KindMismatch { declared, actual } => Some(
            Finding::new(
                FindingKind::KindMismatch,
                format!(
                    "skill '{}' declares '{}' as a {declared}, but it exists as a {actual}",
                    edge.skill_name, edge.target_name
                ),
            )
            .with_skill(edge.skill_name.clone())
            .with_target(edge.target_name.clone()),
        ),
        Verdict::ResolvesToBoth => Some(
            Finding::new(
                FindingKind::ResolvesToBoth,
                format!(
                    "'{}' (declared by skill '{}') exists as both a module and a skill",
                    edge.target_name, edge.skill_name
                ),
            )
            .with_skill(edge.skill_name.clone())
            .with_target(edge.target_name.clone()),
        ),
        Verdict::Missing => Some(
            Finding::new(
                FindingKind::Missing,
                format!(
                    "skill '{}' references '{}', which exists in no namespace",
                    edge.skill_name, edge.target_name
                ),
            )
            .with_skill(edge.skill_name.clone())
            .with_target(edge.target_name.clone()),
        ),
    }
}
