//! Derived analysis over a loaded snapshot.
//!
//! Each submodule is one pipeline stage: resolution verdicts, usage
//! aggregation, lesson mapping, health scoring, gap analysis. Every
//! stage is a pure function of the snapshot plus upstream results, and
//! every stage returns findings as data rather than raising them.

pub mod consistency;
pub mod findings;
pub mod gaps;
pub mod health;
pub mod lessons;
pub mod usage;

pub use consistency::{ConsistencyReport, ResolvedEdge, Verdict};
pub use findings::{Finding, FindingKind, Severity};
pub use gaps::GapAnalysis;
pub use health::{ModuleHealth, ScoringPolicy, UpgradePriority};
pub use lessons::{LessonMapOutcome, LessonMapping, LessonPolicy, Relevance};
pub use usage::{ModuleUsage, SkillUsage, UsageSummary};
