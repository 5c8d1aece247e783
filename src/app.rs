//! Shared command context.

use std::path::PathBuf;

use crate::cli::Cli;
use crate::config::Config;
use crate::engine::EngineOptions;
use crate::error::Result;
use crate::registry::{Snapshot, load_registry};

/// Resolved invocation state every command runs against.
pub struct AppContext {
    pub registry_path: PathBuf,
    pub config: Config,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        // Flag (or SG_REGISTRY via clap's env fallback) beats config.
        let registry_path = cli
            .registry
            .clone()
            .unwrap_or_else(|| config.registry.path.clone());

        Ok(Self {
            registry_path,
            config,
            verbosity: cli.verbose,
        })
    }

    /// Load the registry export this run analyzes.
    pub fn load_snapshot(&self) -> Result<Snapshot> {
        load_registry(&self.registry_path)
    }

    /// Engine tunables from config; commands may override per-flag.
    #[must_use]
    pub fn engine_options(&self) -> EngineOptions {
        EngineOptions::from_config(&self.config)
    }
}
