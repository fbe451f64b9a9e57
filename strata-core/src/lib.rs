//! Strata core library: document model, plugin configuration, selection.
//!
//! - [`types`]: documents, contents, attribute maps
//! - [`config`]: [`PluginConfig`] and the `strata.yaml` [`SiteConfig`]
//! - [`selector`]: the participation predicate
//! - [`error`]: [`ConfigError`]
//! - [`walk`]: recursive file listing shared by source and template loading

pub mod config;
pub mod error;
pub mod selector;
pub mod types;
pub mod walk;

pub use config::{PatternSpec, PluginConfig, SiteConfig, DEFAULT_CONCURRENCY, DEFAULT_DIRECTORY};
pub use error::ConfigError;
pub use selector::Selector;
pub use types::{
    template_name, Attributes, Contents, Document, DocumentMap, Metadata, CONTENTS_KEY,
    TEMPLATE_KEY,
};
pub use walk::{files_under, WalkError, WalkedFile};
