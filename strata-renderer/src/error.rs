//! Error types for strata-renderer.

use std::path::PathBuf;

use thiserror::Error;

/// All errors a template engine adapter can report for one render.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("tera: {0}")]
    Tera(#[from] tera::Error),

    #[error("handlebars: {0}")]
    Handlebars(#[from] handlebars::RenderError),

    /// The render context could not be converted for the engine.
    #[error("render context is not serializable: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A template file could not be read (render-file mode, template dirs).
    #[error("cannot read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<strata_core::WalkError> for RenderError {
    fn from(err: strata_core::WalkError) -> Self {
        RenderError::Io {
            path: err.path,
            source: err.source,
        }
    }
}

pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}
