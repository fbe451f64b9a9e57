//! Error types for strata-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise while loading or validating configuration.
///
/// These are raised synchronously, before any document is processed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `engine` option was not provided.
    #[error("\"engine\" option required")]
    MissingEngine,

    /// No adapter is registered under the configured engine name.
    #[error("unknown template engine '{name}'")]
    UnknownEngine { name: String },

    /// A `pattern` entry is not a valid glob.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Underlying I/O failure reading a config file.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error on load, with the file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> ConfigError {
    ConfigError::Io {
        path: path.into(),
        source,
    }
}
