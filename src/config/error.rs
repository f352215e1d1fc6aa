//! Fatal configuration errors
//!
//! Every variant is terminal for the invocation: the library hands the first
//! one it hits back up the call chain, and only the binary's outermost layer
//! prints it and picks the process exit status.

use std::path::PathBuf;
use thiserror::Error;

use super::loader::SUPPORTED_EXTENSIONS;
use crate::regexu::PatternError;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// No scan path was given at all.
    #[error("No path provided. Nothing to do")]
    NoPath,

    /// The scan path exists in the settings but not on disk.
    #[error("'{}' is not a directory or a file. Maybe it does not exist", path.display())]
    InvalidPath { path: PathBuf },

    /// The referenced config file is not an existing file.
    #[error("Config file '{}' does not exist", path.display())]
    MissingFile { path: PathBuf },

    /// The config file extension is outside the supported table.
    #[error("Config file '{}' is not supported. Supported extensions: {}", path.display(), SUPPORTED_EXTENSIONS)]
    UnsupportedFormat { path: PathBuf },

    /// An include/exclude string failed pattern compilation.
    #[error(transparent)]
    Pattern(#[from] PatternError),

    /// The config file exists but could not be read.
    #[error("Cannot read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file content is not a valid document for its format.
    #[error("Cannot parse config file '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// A recognized key carries a value the field cannot take.
    #[error("Invalid value for config key '{key}': expected {expected}, got {found}")]
    InvalidValue {
        key: String,
        expected: &'static str,
        found: String,
    },
}
