//! Output plumbing shared by the commands.

use std::path::Path;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::error::{Result, SgError};

/// Report output form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum ReportFormat {
    /// Human-readable text tables (default)
    #[default]
    Text,
    /// Machine-readable JSON
    Structured,
}

impl ReportFormat {
    #[must_use]
    pub const fn is_machine_readable(&self) -> bool {
        matches!(self, Self::Structured)
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Structured => write!(f, "structured"),
        }
    }
}

/// Envelope for the section commands' structured output, so downstream
/// tooling can check status and provenance before touching `data`.
#[derive(Serialize)]
pub struct MachineEnvelope<T> {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub data: T,
}

impl<T: Serialize> MachineEnvelope<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            status: "ok",
            timestamp: Utc::now(),
            version: crate::VERSION,
            data,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Write to the destination file, or stdout when none is given.
pub fn write_output(out: Option<&Path>, content: &str) -> Result<()> {
    match out {
        Some(path) => std::fs::write(path, content).map_err(|err| SgError::ReportWrite {
            destination: path.display().to_string(),
            reason: err.to_string(),
        }),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

/// Colors only make sense on an interactive terminal with no file
/// destination.
#[must_use]
pub fn use_color(out: Option<&Path>) -> bool {
    out.is_none() && console::colors_enabled()
}
