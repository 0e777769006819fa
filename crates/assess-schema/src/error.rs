//! Schema-loading error types.
//!
//! File-level failures carry the offending path. Structural faults found
//! after parsing are [`ConfigurationError`]s from `assess-core`, wrapped so a
//! caller can match on either layer.

use std::path::PathBuf;

use assess_core::{AssessError, ConfigurationError};
use thiserror::Error;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// YAML parsing failed.
    #[error("failed to parse YAML at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// JSON parsing failed.
    #[error("failed to parse JSON at {path}: {source}")]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A required file or directory was not found.
    #[error("required file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// A configuration file has an extension the loader does not handle.
    #[error("unsupported configuration file {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },

    /// The parsed tables violate a structural rule.
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Core-level failure (digest computation).
    #[error(transparent)]
    Core(#[from] AssessError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;
