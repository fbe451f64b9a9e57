//! # strata-pipeline
//!
//! The recursive render chain and the concurrency driver around it.
//!
//! Build a [`TemplatesPlugin`] from a [`PluginConfig`](strata_core::PluginConfig)
//! and an [`EngineRegistry`](strata_renderer::EngineRegistry), then call
//! [`TemplatesPlugin::run`] with the host's document map and a [`Host`].
//! [`read_documents`] and [`write_documents`] cover the filesystem side for
//! hosts that keep documents on disk.

pub mod chain;
pub mod driver;
pub mod error;
pub mod frontmatter;
pub mod host;
pub mod layout;
pub mod plugin;
pub mod source;
pub mod writer;

pub use driver::RunSummary;
pub use error::{FrontMatterError, PipelineError};
pub use host::{Host, Workspace};
pub use layout::LayoutFile;
pub use plugin::{RunOptions, TemplatesPlugin};
pub use source::read_documents;
pub use writer::{write_documents, WriteResult};
