//! Error handling for skillgraph.
//!
//! This module provides:
//! - [`SgError`]: The main error enum for all sg operations
//! - [`ErrorCode`]: Standardized error codes for machine parsing
//! - [`StructuredError`]: Rich error type with suggestions and context
//!
//! Only *fatal* conditions travel through this module. Analysis findings
//! (missing references, kind mismatches, self-dependencies, cycles) are
//! data, carried alongside results (see `analysis::findings`).

mod codes;

use std::io;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub use codes::ErrorCode;

/// Main error type for skillgraph operations.
#[derive(Error, Debug)]
pub enum SgError {
    #[error("Registry not found: {0}")]
    RegistryNotFound(String),

    #[error("Registry parse error: {0}")]
    RegistryParse(String),

    #[error("Malformed {collection} record {ordinal}: {reason}")]
    MalformedRecord {
        collection: String,
        ordinal: usize,
        reason: String,
    },

    #[error("Duplicate {collection} {field} '{value}'")]
    DuplicateRecord {
        collection: String,
        field: String,
        value: String,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Missing required config: {0}")]
    MissingConfig(String),

    #[error("Report write failed for {destination}: {reason}")]
    ReportWrite {
        destination: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SgError {
    /// Get the error code for this error.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::RegistryNotFound(_) => ErrorCode::RegistryNotFound,
            Self::RegistryParse(_) => ErrorCode::RegistryParseError,
            Self::MalformedRecord { .. } => ErrorCode::MalformedRecord,
            Self::DuplicateRecord { .. } => ErrorCode::DuplicateRecord,
            Self::Config(_) => ErrorCode::ConfigInvalid,
            Self::MissingConfig(_) => ErrorCode::ConfigMissingRequired,
            Self::ReportWrite { .. } => ErrorCode::ReportWriteFailed,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::SerializationError,
        }
    }

    /// Get context information for this error as JSON.
    #[must_use]
    pub fn context(&self) -> Option<Value> {
        match self {
            Self::RegistryNotFound(path) => Some(serde_json::json!({ "path": path })),
            Self::MalformedRecord {
                collection,
                ordinal,
                reason,
            } => Some(serde_json::json!({
                "collection": collection,
                "ordinal": ordinal,
                "reason": reason,
            })),
            Self::DuplicateRecord {
                collection,
                field,
                value,
            } => Some(serde_json::json!({
                "collection": collection,
                "field": field,
                "value": value,
            })),
            Self::MissingConfig(key) => Some(serde_json::json!({ "config_key": key })),
            Self::ReportWrite { destination, .. } => {
                Some(serde_json::json!({ "destination": destination }))
            }
            _ => None,
        }
    }

    /// Whether this error is a fatal load error (aborts before any
    /// derived computation).
    #[must_use]
    pub const fn is_fatal_load(&self) -> bool {
        matches!(
            self,
            Self::MalformedRecord { .. }
                | Self::DuplicateRecord { .. }
                | Self::RegistryNotFound(_)
                | Self::RegistryParse(_)
        )
    }

    /// Convert this error to a structured error.
    #[must_use]
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::from_sg_error(self)
    }
}

/// A structured error with machine-readable code, suggestion, and context.
///
/// This type is designed for structured output where downstream tooling
/// needs to parse failures and take appropriate action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// The error code (e.g., "DUPLICATE_RECORD")
    pub code: ErrorCode,

    /// The numeric error code (e.g., 104)
    pub numeric_code: u16,

    /// Human-readable error message
    pub message: String,

    /// Actionable suggestion for recovery
    pub suggestion: String,

    /// Additional context for debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Value>,

    /// Whether this error is potentially recoverable by the user
    pub recoverable: bool,

    /// Error category (e.g., "registry", "config")
    pub category: String,
}

impl StructuredError {
    /// Create a new structured error.
    #[must_use]
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            numeric_code: code.numeric(),
            suggestion: code.suggestion().to_string(),
            context: None,
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
            code,
            message: message.into(),
        }
    }

    /// Create a structured error from an `SgError`.
    #[must_use]
    pub fn from_sg_error(err: &SgError) -> Self {
        let code = err.code();
        Self {
            code,
            numeric_code: code.numeric(),
            message: err.to_string(),
            suggestion: code.suggestion().to_string(),
            context: err.context(),
            recoverable: code.is_recoverable(),
            category: code.category().to_string(),
        }
    }

    /// Add context to this error.
    #[must_use]
    pub fn with_context(mut self, context: Value) -> Self {
        self.context = Some(context);
        self
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl From<SgError> for StructuredError {
    fn from(err: SgError) -> Self {
        Self::from_sg_error(&err)
    }
}

impl From<&SgError> for StructuredError {
    fn from(err: &SgError) -> Self {
        Self::from_sg_error(err)
    }
}

/// Result type alias using SgError.
pub type Result<T> = std::result::Result<T, SgError>;
