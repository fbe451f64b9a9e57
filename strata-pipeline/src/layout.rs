//! Layout files: loaded on demand while walking a chain.

use std::path::PathBuf;

use strata_core::{template_name, Attributes};

use crate::error::PipelineError;
use crate::frontmatter;

/// A parsed layout: front-matter attributes plus template body.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutFile {
    pub name: String,
    pub path: PathBuf,
    pub attributes: Attributes,
    pub body: String,
}

impl LayoutFile {
    /// Read and split the layout at `path` without blocking the scheduler.
    pub async fn load(name: &str, path: PathBuf) -> Result<Self, PipelineError> {
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(source) => return Err(PipelineError::LayoutRead { path, source }),
        };
        let parsed = match frontmatter::parse(&text) {
            Ok(parsed) => parsed,
            Err(source) => return Err(PipelineError::FrontMatter { path, source }),
        };
        Ok(LayoutFile {
            name: name.to_string(),
            path,
            attributes: parsed.attributes,
            body: parsed.body,
        })
    }

    /// The parent layout this one chains to, if any.
    pub fn parent(&self) -> Option<&str> {
        template_name(&self.attributes)
    }
}
