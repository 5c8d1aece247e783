//! Layered TOML configuration.
//!
//! Defaults, then the global config (`~/.config/skillgraph/config.toml`),
//! then the project config (`./skillgraph.toml`), then an explicit
//! `--config`/`SG_CONFIG` path (which replaces the layering), then env
//! overrides. CLI flags beat everything and are applied by the commands
//! themselves.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::health::ScoringPolicy;
use crate::analysis::lessons::LessonPolicy;
use crate::error::{Result, SgError};

pub const PROJECT_CONFIG_NAME: &str = "skillgraph.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub lessons: LessonsConfig,
    #[serde(default)]
    pub analyzer: AnalyzerConfig,
}

impl Config {
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("SG_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(SgError::Config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(Path::new(PROJECT_CONFIG_NAME))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("skillgraph/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| SgError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| SgError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.registry {
            self.registry.merge(patch);
        }
        if let Some(patch) = patch.scoring {
            self.scoring.merge(patch);
        }
        if let Some(patch) = patch.lessons {
            self.lessons.merge(patch);
        }
        if let Some(patch) = patch.analyzer {
            self.analyzer.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("SG_REGISTRY") {
            if !path.trim().is_empty() {
                self.registry.path = PathBuf::from(path);
            }
        }
        if let Ok(raw) = std::env::var("SG_MIN_CLUSTER_SIZE") {
            let size = raw.parse::<usize>().map_err(|_| {
                SgError::Config(format!("SG_MIN_CLUSTER_SIZE must be a positive integer, got '{raw}'"))
            })?;
            if size == 0 {
                return Err(SgError::Config(
                    "SG_MIN_CLUSTER_SIZE must be at least 1".to_string(),
                ));
            }
            self.analyzer.min_cluster_size = size;
        }
        Ok(())
    }
}

/// Where the registry export lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub path: PathBuf,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("registry.json"),
        }
    }
}

impl RegistryConfig {
    fn merge(&mut self, patch: RegistryConfigPatch) {
        if let Some(path) = patch.path {
            self.path = path;
        }
    }
}

/// Health-scoring constants. Policy, not law.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub lesson_weight: i64,
    pub usage_weight: i64,
    pub critical_threshold: usize,
    pub high_threshold: usize,
    pub medium_threshold: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let policy = ScoringPolicy::default();
        Self {
            lesson_weight: policy.lesson_weight,
            usage_weight: policy.usage_weight,
            critical_threshold: policy.critical_threshold,
            high_threshold: policy.high_threshold,
            medium_threshold: policy.medium_threshold,
        }
    }
}

impl ScoringConfig {
    #[must_use]
    pub fn to_policy(&self) -> ScoringPolicy {
        ScoringPolicy {
            lesson_weight: self.lesson_weight,
            usage_weight: self.usage_weight,
            critical_threshold: self.critical_threshold,
            high_threshold: self.high_threshold,
            medium_threshold: self.medium_threshold,
        }
    }

    fn merge(&mut self, patch: ScoringConfigPatch) {
        if let Some(v) = patch.lesson_weight {
            self.lesson_weight = v;
        }
        if let Some(v) = patch.usage_weight {
            self.usage_weight = v;
        }
        if let Some(v) = patch.critical_threshold {
            self.critical_threshold = v;
        }
        if let Some(v) = patch.high_threshold {
            self.high_threshold = v;
        }
        if let Some(v) = patch.medium_threshold {
            self.medium_threshold = v;
        }
    }
}

/// Lesson relevance category sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonsConfig {
    pub bugfix_categories: Vec<String>,
    pub actionable_categories: Vec<String>,
}

impl Default for LessonsConfig {
    fn default() -> Self {
        let policy = LessonPolicy::default();
        Self {
            bugfix_categories: policy.bugfix_categories,
            actionable_categories: policy.actionable_categories,
        }
    }
}

impl LessonsConfig {
    #[must_use]
    pub fn to_policy(&self) -> LessonPolicy {
        LessonPolicy {
            bugfix_categories: self.bugfix_categories.clone(),
            actionable_categories: self.actionable_categories.clone(),
        }
    }

    fn merge(&mut self, patch: LessonsConfigPatch) {
        if let Some(v) = patch.bugfix_categories {
            self.bugfix_categories = v;
        }
        if let Some(v) = patch.actionable_categories {
            self.actionable_categories = v;
        }
    }
}

/// Gap-analyzer knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub min_cluster_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_cluster_size: 4,
        }
    }
}

impl AnalyzerConfig {
    fn merge(&mut self, patch: AnalyzerConfigPatch) {
        if let Some(v) = patch.min_cluster_size {
            self.min_cluster_size = v;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    registry: Option<RegistryConfigPatch>,
    scoring: Option<ScoringConfigPatch>,
    lessons: Option<LessonsConfigPatch>,
    analyzer: Option<AnalyzerConfigPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RegistryConfigPatch {
    path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ScoringConfigPatch {
    lesson_weight: Option<i64>,
    usage_weight: Option<i64>,
    critical_threshold: Option<usize>,
    high_threshold: Option<usize>,
    medium_threshold: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LessonsConfigPatch {
    bugfix_categories: Option<Vec<String>>,
    actionable_categories: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct AnalyzerConfigPatch {
    min_cluster_size: Option<usize>,
}
