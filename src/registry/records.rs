//! Record types for the registry export.
//!
//! These mirror the export schema one-to-one. Optional prose fields
//! default to empty so a minimal export stays loadable; ids and names are
//! validated by the loader, not here.

use serde::{Deserialize, Serialize};

/// A declared unit of instructional content. Skills are the only record
/// kind with outgoing dependency declarations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Free-form kind tag from the catalog (e.g. "integration", "guide").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind_tag: Option<String>,
}

/// A reusable code/pattern unit referenced by skills. Modules never
/// declare dependencies of their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub status: String,
}

/// A finer-grained reusable snippet. Participates in resolution as an
/// alternate namespace but is never scored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeBlock {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A recorded field observation. Immutable; the engine never edits
/// lessons, only classifies their relevance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_project: Option<String>,
    /// Pre-tagged candidate target names (module or skill) this lesson
    /// was observed against.
    #[serde(default)]
    pub targets: Vec<String>,
}

/// The kind a dependency declaration claims its target to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyKind {
    Module,
    Skill,
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Module => write!(f, "module"),
            Self::Skill => write!(f, "skill"),
        }
    }
}

/// The kind of entity a name actually resolves to. Superset of
/// [`DependencyKind`]: code blocks exist as a namespace but cannot be
/// declared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Module,
    Skill,
    CodeBlock,
}

impl EntityKind {
    /// Whether this entity kind satisfies the given declared kind.
    #[must_use]
    pub const fn satisfies(&self, declared: DependencyKind) -> bool {
        matches!(
            (self, declared),
            (Self::Module, DependencyKind::Module) | (Self::Skill, DependencyKind::Skill)
        )
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Module => write!(f, "module"),
            Self::Skill => write!(f, "skill"),
            Self::CodeBlock => write!(f, "code block"),
        }
    }
}

/// Dependency strength. The source registry writes these as "D"
/// (direct/required) and "O" (optional); both spellings are accepted.
/// Strength is retained for display only; usage counting treats the two
/// identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    #[default]
    Required,
    Optional,
}

impl Strength {
    /// Parse any of the accepted spellings, case-insensitive.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "required" | "direct" | "r" | "d" => Some(Self::Required),
            "optional" | "o" => Some(Self::Optional),
            _ => None,
        }
    }

    /// One-letter tag used in the dependency matrix.
    #[must_use]
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Required => "D",
            Self::Optional => "O",
        }
    }
}

impl<'de> Deserialize<'de> for Strength {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).ok_or_else(|| {
            serde::de::Error::custom(format!("unknown dependency strength '{raw}'"))
        })
    }
}

impl std::fmt::Display for Strength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Optional => write!(f, "optional"),
        }
    }
}

/// A raw dependency declaration as it appears in the export. The
/// declared kind comes from which collection the edge sits in
/// (`module_deps` vs `skill_deps`), not from the record itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEdge {
    pub skill_id: String,
    #[serde(alias = "target_name")]
    pub target: String,
    #[serde(default)]
    pub strength: Strength,
}

/// A normalized dependency declaration: one skill declaring one target
/// name under one kind. One skill may declare many edges, including
/// duplicates across kinds; the loader preserves them all in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyEdge {
    pub skill_id: String,
    pub skill_name: String,
    pub target_name: String,
    pub declared_kind: DependencyKind,
    pub strength: Strength,
}

/// The raw registry export document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryExport {
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub code_blocks: Vec<CodeBlock>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
    /// Skill→module declarations (declared kind Module).
    #[serde(default)]
    pub module_deps: Vec<RawEdge>,
    /// Skill→skill declarations (declared kind Skill).
    #[serde(default)]
    pub skill_deps: Vec<RawEdge>,
}
