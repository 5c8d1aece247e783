//! Standardized error codes for machine-parseable output.
//!
//! Error codes follow a numeric taxonomy:
//! - 1xx: Registry errors
//! - 3xx: Config errors
//! - 8xx: Report errors
//! - 9xx: Internal errors

use serde::{Deserialize, Serialize};

/// Standardized error codes for machine output.
///
/// Each variant maps to a numeric code (e.g., `MalformedRecord` -> E103).
/// Codes are grouped by category for easy identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // ========================================
    // Registry errors (1xx)
    // ========================================
    /// E101: Registry export file was not found
    RegistryNotFound,
    /// E102: Registry export exists but could not be parsed
    RegistryParseError,
    /// E103: A record is missing its id or name
    MalformedRecord,
    /// E104: Two records of one kind share an id or name
    DuplicateRecord,

    // ========================================
    // Config errors (3xx)
    // ========================================
    /// E301: Config file not found
    ConfigNotFound,
    /// E302: Config file has invalid syntax or values
    ConfigInvalid,
    /// E304: Required config value is missing
    ConfigMissingRequired,

    // ========================================
    // Report errors (8xx)
    // ========================================
    /// E801: Failed to write the report to its destination
    ReportWriteFailed,

    // ========================================
    // Internal errors (9xx)
    // ========================================
    /// E901: Unexpected internal error
    InternalError,
    /// E902: Serialization of derived output failed
    SerializationError,
    /// E906: IO operation failed
    IoError,
}

impl ErrorCode {
    /// Get the numeric error code (e.g., `MalformedRecord` -> 103).
    #[must_use]
    pub const fn numeric(&self) -> u16 {
        match self {
            // Registry errors (1xx)
            Self::RegistryNotFound => 101,
            Self::RegistryParseError => 102,
            Self::MalformedRecord => 103,
            Self::DuplicateRecord => 104,

            // Config errors (3xx)
            Self::ConfigNotFound => 301,
            Self::ConfigInvalid => 302,
            Self::ConfigMissingRequired => 304,

            // Report errors (8xx)
            Self::ReportWriteFailed => 801,

            // Internal errors (9xx)
            Self::InternalError => 901,
            Self::SerializationError => 902,
            Self::IoError => 906,
        }
    }

    /// Get the error code as a formatted string (e.g., "E103").
    #[must_use]
    pub fn code_string(&self) -> String {
        format!("E{}", self.numeric())
    }

    /// Get the default suggestion for this error code.
    #[must_use]
    pub const fn suggestion(&self) -> &'static str {
        match self {
            // Registry errors
            Self::RegistryNotFound => {
                "Check the --registry path, or set SG_REGISTRY / [registry].path in config"
            }
            Self::RegistryParseError => {
                "The export must be a JSON document with skills, modules, code_blocks, lessons, module_deps, skill_deps collections"
            }
            Self::MalformedRecord => {
                "Every record needs a non-empty id and name. Fix the named record in the export and re-run"
            }
            Self::DuplicateRecord => {
                "Ids and names must be unique within a record kind. Rename or remove one of the colliding records"
            }

            // Config errors
            Self::ConfigNotFound => "Create skillgraph.toml or specify --config <path>",
            Self::ConfigInvalid => "Check TOML syntax and section names in the config file",
            Self::ConfigMissingRequired => "Set the required value in skillgraph.toml",

            // Report errors
            Self::ReportWriteFailed => {
                "Check write permissions on the --out destination and available disk space"
            }

            // Internal errors
            Self::InternalError => {
                "An unexpected error occurred. Please report this issue with full error output"
            }
            Self::SerializationError => {
                "The derived data could not be serialized; please report this issue"
            }
            Self::IoError => "Check file permissions and that the path exists",
        }
    }

    /// Whether the user can plausibly recover by following the suggestion.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InternalError | Self::SerializationError)
    }

    /// Error category for grouping in machine output.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::RegistryNotFound
            | Self::RegistryParseError
            | Self::MalformedRecord
            | Self::DuplicateRecord => "registry",
            Self::ConfigNotFound | Self::ConfigInvalid | Self::ConfigMissingRequired => "config",
            Self::ReportWriteFailed => "report",
            Self::InternalError | Self::SerializationError | Self::IoError => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "E{}", self.numeric())
    }
}
