//! Registry export loading and validation.
//!
//! Validation is fatal: every downstream component keys off record
//! names and ids, so a malformed or colliding record aborts the run
//! before any derived computation. Everything softer (dangling
//! references, kind mismatches) is a finding produced later, not a
//! load error.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use super::records::{DependencyEdge, DependencyKind, RawEdge, RegistryExport};
use super::snapshot::Snapshot;
use crate::error::{Result, SgError};

/// Load a registry export from disk and build the snapshot.
pub fn load_registry(path: &Path) -> Result<Snapshot> {
    if !path.exists() {
        return Err(SgError::RegistryNotFound(path.display().to_string()));
    }
    let raw = std::fs::read_to_string(path)?;
    let export: RegistryExport = serde_json::from_str(&raw)
        .map_err(|err| SgError::RegistryParse(format!("{}: {err}", path.display())))?;
    build_snapshot(export)
}

/// Validate an export and produce the immutable snapshot.
pub fn build_snapshot(export: RegistryExport) -> Result<Snapshot> {
    validate_records(
        "skills",
        export.skills.iter().map(|s| (s.id.as_str(), s.name.as_str())),
    )?;
    validate_records(
        "modules",
        export
            .modules
            .iter()
            .map(|m| (m.id.as_str(), m.name.as_str())),
    )?;
    validate_records(
        "code_blocks",
        export
            .code_blocks
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str())),
    )?;
    validate_records(
        "lessons",
        export
            .lessons
            .iter()
            .map(|l| (l.id.as_str(), l.title.as_str())),
    )?;

    let skill_ids: HashSet<&str> = export.skills.iter().map(|s| s.id.as_str()).collect();
    let mut edges = Vec::with_capacity(export.module_deps.len() + export.skill_deps.len());
    normalize_edges(
        "module_deps",
        &export.module_deps,
        DependencyKind::Module,
        &export,
        &skill_ids,
        &mut edges,
    )?;
    normalize_edges(
        "skill_deps",
        &export.skill_deps,
        DependencyKind::Skill,
        &export,
        &skill_ids,
        &mut edges,
    )?;

    debug!(
        skills = export.skills.len(),
        modules = export.modules.len(),
        code_blocks = export.code_blocks.len(),
        lessons = export.lessons.len(),
        edges = edges.len(),
        "registry loaded"
    );

    Ok(Snapshot::new(
        export.modules,
        export.skills,
        export.code_blocks,
        export.lessons,
        edges,
    ))
}

/// Reject empty ids/names and id/name collisions within one kind.
fn validate_records<'a>(
    collection: &str,
    records: impl Iterator<Item = (&'a str, &'a str)>,
) -> Result<()> {
    let mut seen_ids: HashSet<String> = HashSet::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    for (ordinal, (id, name)) in records.enumerate() {
        let ordinal = ordinal + 1;
        if id.trim().is_empty() {
            return Err(SgError::MalformedRecord {
                collection: collection.to_string(),
                ordinal,
                reason: "empty id".to_string(),
            });
        }
        if name.trim().is_empty() {
            return Err(SgError::MalformedRecord {
                collection: collection.to_string(),
                ordinal,
                reason: format!("record '{id}' has an empty name"),
            });
        }
        if !seen_ids.insert(id.to_string()) {
            return Err(SgError::DuplicateRecord {
                collection: collection.to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            });
        }
        if !seen_names.insert(name.to_string()) {
            return Err(SgError::DuplicateRecord {
                collection: collection.to_string(),
                field: "name".to_string(),
                value: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Normalize one declaration collection, attaching the declared kind and
/// resolving the declaring skill's display name.
fn normalize_edges(
    collection: &str,
    raw: &[RawEdge],
    declared_kind: DependencyKind,
    export: &RegistryExport,
    skill_ids: &HashSet<&str>,
    out: &mut Vec<DependencyEdge>,
) -> Result<()> {
    for (ordinal, edge) in raw.iter().enumerate() {
        let ordinal = ordinal + 1;
        if edge.skill_id.trim().is_empty() {
            return Err(SgError::MalformedRecord {
                collection: collection.to_string(),
                ordinal,
                reason: "empty skill_id".to_string(),
            });
        }
        if edge.target.trim().is_empty() {
            return Err(SgError::MalformedRecord {
                collection: collection.to_string(),
                ordinal,
                reason: format!("edge from '{}' has an empty target", edge.skill_id),
            });
        }
        // Edges are extracted from skill declarations; an unknown origin
        // means the export itself is corrupt, not a dangling reference.
        if !skill_ids.contains(edge.skill_id.as_str()) {
            return Err(SgError::MalformedRecord {
                collection: collection.to_string(),
                ordinal,
                reason: format!("unknown declaring skill '{}'", edge.skill_id),
            });
        }
        let skill_name = export
            .skills
            .iter()
            .find(|s| s.id == edge.skill_id)
            .map(|s| s.name.clone())
            .unwrap_or_default();

        out.push(DependencyEdge {
            skill_id: edge.skill_id.clone(),
            skill_name,
            target_name: edge.target.clone(),
            declared_kind,
            strength: edge.strength,
        });
    }
    Ok(())
}
