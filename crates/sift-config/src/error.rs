//! Error types for sift configuration.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::{de, ser};

/// Errors that can occur when loading or processing configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read a configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("failed to parse config file {path}: {source}")]
    ParseToml {
        /// Path to the file that could not be parsed.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: de::Error,
    },

    /// A dialect was requested that no config defines.
    #[error("unknown dialect '{name}' (available: {available})")]
    UnknownDialect {
        /// Requested dialect name.
        name: String,
        /// Comma-separated list of known dialects.
        available: String,
    },

    /// Failed to render settings back to TOML.
    #[error("failed to serialize settings: {source}")]
    Serialize {
        /// Underlying TOML serialization error.
        source: ser::Error,
    },
}
