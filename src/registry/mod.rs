//! Registry export ingestion.
//!
//! The registry export is a single JSON document with six collections:
//! four record kinds (skills, modules, code blocks, lessons) and two
//! declaration kinds (skill→module edges, skill→skill edges). The loader
//! validates them and produces an immutable [`Snapshot`] that every
//! downstream component reads; nothing mutates the snapshot after
//! construction.

mod loader;
mod records;
mod snapshot;

pub use loader::{build_snapshot, load_registry};
pub use records::{
    CodeBlock, DependencyEdge, DependencyKind, EntityKind, Lesson, Module, RawEdge,
    RegistryExport, Skill, Strength,
};
pub use snapshot::Snapshot;
