//! Error types for the country dataset helpers.
//!
//! - [`DatasetError`] - Reading, parsing, checking and writing dataset files
//! - [`ConfigError`] - Malformed environment configuration
//! - [`CommandError`] - Top-level CLI errors
//!
//! Data-quality problems (unmatched countries, invalid flags) are not errors:
//! they are reported as [`crate::transform::MergeWarning`] values and the run
//! continues.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Dataset Errors
// =============================================================================

/// Errors while loading or saving a dataset file.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Input file does not exist.
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Input file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file is not a JSON array of objects.
    #[error("Invalid JSON in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A record is missing a field the operation depends on.
    #[error("Record {index} in {} is invalid: {}", path.display(), errors.join("; "))]
    InvalidRecord {
        path: PathBuf,
        index: usize,
        errors: Vec<String>,
    },

    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Output file could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DatasetError {
    /// Build a read error, mapping `NotFound` to its own variant.
    pub fn from_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            DatasetError::NotFound { path }
        } else {
            DatasetError::Read { path, source }
        }
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Errors while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Environment variable is set but unusable.
    #[error("Invalid value '{value}' for {key}: {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

// =============================================================================
// Command Errors (top-level)
// =============================================================================

/// Errors surfaced by the `langmap` binary.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Dataset error.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Bad command line (rendered clap message).
    #[error("Usage error: {0}")]
    Usage(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for dataset operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
