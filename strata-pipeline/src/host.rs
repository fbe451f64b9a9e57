//! Host capabilities consumed by a render run.

use std::path::{Path, PathBuf};

use strata_core::Metadata;

/// What the surrounding build provides to the templates plugin.
pub trait Host: Sync {
    /// Global metadata, shared read-only by every document.
    fn metadata(&self) -> &Metadata;

    /// Join `segments` onto the host's working root.
    fn path(&self, segments: &[&Path]) -> PathBuf;

    /// Whether layout files carry front matter that should be parsed.
    fn frontmatter_enabled(&self) -> bool;
}

/// Filesystem-rooted [`Host`].
#[derive(Debug, Clone, PartialEq)]
pub struct Workspace {
    root: PathBuf,
    metadata: Metadata,
    frontmatter: bool,
}

impl Workspace {
    /// A workspace at `root` with empty metadata and front matter enabled.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            metadata: Metadata::new(),
            frontmatter: true,
        }
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_frontmatter(mut self, enabled: bool) -> Self {
        self.frontmatter = enabled;
        self
    }
}

impl Host for Workspace {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    fn path(&self, segments: &[&Path]) -> PathBuf {
        segments
            .iter()
            .fold(self.root.clone(), |acc, segment| acc.join(segment))
    }

    fn frontmatter_enabled(&self) -> bool {
        self.frontmatter
    }
}
