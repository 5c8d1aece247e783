//! Shared fixture helpers for the integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

/// The standard mixed-health registry used across CLI tests: a handful
/// of SEO/content skills, a mobile-ux orphan cluster, one missing
/// reference, one kind mismatch, one ambiguous name, one self-edge.
pub const SAMPLE_REGISTRY: &str = include_str!("../fixtures/registry.json");

pub struct Fixture {
    _dir: TempDir,
    pub registry_path: PathBuf,
    work_dir: PathBuf,
}

impl Fixture {
    /// Write `registry_json` into a fresh tempdir and target it.
    pub fn new(registry_json: &str) -> Self {
        let dir = TempDir::new().expect("create tempdir");
        let registry_path = dir.path().join("registry.json");
        std::fs::write(&registry_path, registry_json).expect("write registry");
        let work_dir = dir.path().to_path_buf();
        Self {
            _dir: dir,
            registry_path,
            work_dir,
        }
    }

    pub fn sample() -> Self {
        Self::new(SAMPLE_REGISTRY)
    }

    /// A command pre-wired to this fixture's registry, running inside
    /// the tempdir so no stray project config leaks in.
    pub fn sg(&self) -> Command {
        let mut cmd = Command::cargo_bin("sg").expect("binary builds");
        cmd.current_dir(&self.work_dir)
            .env_remove("SG_REGISTRY")
            .env_remove("SG_CONFIG")
            .env_remove("SG_MIN_CLUSTER_SIZE")
            .arg("--registry")
            .arg(&self.registry_path);
        cmd
    }

    /// Write a project config next to the registry.
    pub fn write_config(&self, toml: &str) {
        std::fs::write(self.work_dir.join("skillgraph.toml"), toml).expect("write config");
    }

    pub fn path_in_dir(&self, name: &str) -> PathBuf {
        self.work_dir.join(name)
    }
}
