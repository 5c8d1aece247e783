//! Findings are data, not errors.
//!
//! Every defect the pipeline surfaces short of a fatal load error
//! (missing references, kind mismatches, ambiguous names, self-edges,
//! cross-skill cycles) travels as a [`Finding`] alongside the component
//! results and is merged into the report. Findings never cross component
//! boundaries as panics or `Err`s; only `--fail-on-missing` lets the
//! error-severity ones influence the exit status.

use serde::{Deserialize, Serialize};

/// Severity of a finding. Warnings are always advisory; errors are still
/// advisory unless `--fail-on-missing` is set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// What kind of defect a finding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    Missing,
    KindMismatch,
    ResolvesToBoth,
    SelfDependency,
    CyclicSkillDependency,
}

impl FindingKind {
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Missing => Severity::Error,
            Self::KindMismatch
            | Self::ResolvesToBoth
            | Self::SelfDependency
            | Self::CyclicSkillDependency => Severity::Warning,
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Missing => write!(f, "missing"),
            Self::KindMismatch => write!(f, "kind-mismatch"),
            Self::ResolvesToBoth => write!(f, "resolves-to-both"),
            Self::SelfDependency => write!(f, "self-dependency"),
            Self::CyclicSkillDependency => write!(f, "cyclic-skill-dependency"),
        }
    }
}

/// One surfaced defect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,
    /// The declaring skill, when the finding is tied to one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skill: Option<String>,
    /// The target name involved, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

impl Finding {
    #[must_use]
    pub fn new(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.severity(),
            message: message.into(),
            skill: None,
            target: None,
        }
    }

    #[must_use]
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skill = Some(skill.into());
        self
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.severity, Severity::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_per_kind() {
        assert_eq!(FindingKind::Missing.severity(), Severity::Error);
        assert_eq!(FindingKind::KindMismatch.severity(), Severity::Warning);
        assert_eq!(FindingKind::ResolvesToBoth.severity(), Severity::Warning);
        assert_eq!(FindingKind::SelfDependency.severity(), Severity::Warning);
        assert_eq!(
            FindingKind::CyclicSkillDependency.severity(),
            Severity::Warning
        );
    }

    #[test]
    fn test_builder() {
        let finding = Finding::new(FindingKind::Missing, "unresolved reference")
            .with_skill("s3-uploader")
            .with_target("webhook-universal");
        assert!(finding.is_error());
        assert_eq!(finding.skill.as_deref(), Some("s3-uploader"));
        assert_eq!(finding.target.as_deref(), Some("webhook-universal"));
    }
}
