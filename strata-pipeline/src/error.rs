//! Error types for strata-pipeline.

use std::path::PathBuf;

use thiserror::Error;

use strata_core::ConfigError;
use strata_renderer::RenderError;

/// All errors that can arise from a render run.
///
/// Layout read and front-matter failures travel through this type exactly
/// like engine failures, so a run always reports one error value.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Invalid plugin configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The engine failed on one layer of a document's chain.
    #[error("failed to render '{document}': {source}")]
    Render {
        document: String,
        /// Layout being rendered; `None` for in-place rendering.
        layout: Option<String>,
        #[source]
        source: RenderError,
    },

    /// A document was handed to a chain without any layout to use.
    #[error("document '{document}' names no layout and no default is configured")]
    NoLayout { document: String },

    /// A layout file is missing or unreadable.
    #[error("failed to read layout at {path}: {source}")]
    LayoutRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file's front matter could not be parsed.
    #[error("invalid front matter in {path}: {source}")]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    /// A layout names a layout already used earlier in the same chain.
    #[error("cyclic layout chain for '{document}': {}", .chain.join(" -> "))]
    CyclicLayout { document: String, chain: Vec<String> },

    /// The run was cancelled by an earlier failure before this chain finished.
    #[error("rendering of '{document}' was cancelled")]
    Cancelled { document: String },

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking entry point could not build its runtime.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

/// Why a front-matter block was rejected.
#[derive(Debug, Error)]
pub enum FrontMatterError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("front matter must be a mapping")]
    NotMapping,
}

impl From<strata_core::WalkError> for PipelineError {
    fn from(err: strata_core::WalkError) -> Self {
        PipelineError::Io {
            path: err.path,
            source: err.source,
        }
    }
}

/// Convenience constructor for [`PipelineError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> PipelineError {
    PipelineError::Io {
        path: path.into(),
        source,
    }
}
