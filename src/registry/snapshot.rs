//! The immutable in-memory view of one registry export.

use std::collections::HashMap;

use super::records::{CodeBlock, DependencyEdge, Lesson, Module, Skill};

/// A loaded registry: O(1) by-name lookup into the module, skill, and
/// code-block namespaces, by-id skill lookup, and the ordered raw edge
/// list. Built once per run by the loader; read-only afterward.
///
/// The three namespaces may legally overlap: a name existing as both a
/// module and a skill is flagged by the consistency checker, never
/// silently resolved.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    modules: HashMap<String, Module>,
    skills: HashMap<String, Skill>,
    code_blocks: HashMap<String, CodeBlock>,
    skill_names_by_id: HashMap<String, String>,
    edges: Vec<DependencyEdge>,
    lessons: Vec<Lesson>,
}

impl Snapshot {
    pub(super) fn new(
        modules: Vec<Module>,
        skills: Vec<Skill>,
        code_blocks: Vec<CodeBlock>,
        lessons: Vec<Lesson>,
        edges: Vec<DependencyEdge>,
    ) -> Self {
        let skill_names_by_id = skills
            .iter()
            .map(|s| (s.id.clone(), s.name.clone()))
            .collect();
        Self {
            modules: modules.into_iter().map(|m| (m.name.clone(), m)).collect(),
            skills: skills.into_iter().map(|s| (s.name.clone(), s)).collect(),
            code_blocks: code_blocks
                .into_iter()
                .map(|c| (c.name.clone(), c))
                .collect(),
            skill_names_by_id,
            edges,
            lessons,
        }
    }

    #[must_use]
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.get(name)
    }

    #[must_use]
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.skills.get(name)
    }

    #[must_use]
    pub fn code_block(&self, name: &str) -> Option<&CodeBlock> {
        self.code_blocks.get(name)
    }

    #[must_use]
    pub fn has_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    #[must_use]
    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.contains_key(name)
    }

    #[must_use]
    pub fn has_code_block(&self, name: &str) -> bool {
        self.code_blocks.contains_key(name)
    }

    #[must_use]
    pub fn skill_name_for_id(&self, id: &str) -> Option<&str> {
        self.skill_names_by_id.get(id).map(String::as_str)
    }

    /// Raw dependency edges in declaration order (module declarations
    /// first, then skill declarations, each in file order).
    #[must_use]
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    #[must_use]
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Modules sorted by name for deterministic iteration.
    #[must_use]
    pub fn modules_sorted(&self) -> Vec<&Module> {
        let mut out: Vec<&Module> = self.modules.values().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    /// Skills sorted by name for deterministic iteration.
    #[must_use]
    pub fn skills_sorted(&self) -> Vec<&Skill> {
        let mut out: Vec<&Skill> = self.skills.values().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }

    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn skill_count(&self) -> usize {
        self.skills.len()
    }

    #[must_use]
    pub fn code_block_count(&self) -> usize {
        self.code_blocks.len()
    }

    #[must_use]
    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }
}
