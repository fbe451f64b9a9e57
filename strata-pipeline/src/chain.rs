//! Render chain: takes one selected document through its layouts.
//!
//! ```text
//! Start ──► Prepared ──► Rendering ──► Done
//!                          │  ▲
//!                          ▼  │
//!                     ChainToParent        (any Rendering step may end in Errored)
//! ```
//!
//! The first layer is the document itself (in-place mode) or the layout it
//! names. Each successful layer is written back into the document; if the
//! layout just rendered names a parent, the parent is loaded, its
//! attributes are layered onto the context, the output so far becomes
//! `contents`, and the parent body is rendered next. Layout names already
//! seen in the chain are rejected as cyclic.

use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;

use strata_core::{Contents, Document, PluginConfig};
use strata_renderer::{RenderContext, RenderSource, TemplateEngine};

use crate::error::PipelineError;
use crate::host::Host;
use crate::layout::LayoutFile;

/// Per-run chain settings, shared by every document of the run.
pub struct RenderChain<'a> {
    config: &'a PluginConfig,
    engine: &'a dyn TemplateEngine,
    host: &'a dyn Host,
    cancel: &'a CancellationToken,
}

impl<'a> RenderChain<'a> {
    pub fn new(
        config: &'a PluginConfig,
        engine: &'a dyn TemplateEngine,
        host: &'a dyn Host,
        cancel: &'a CancellationToken,
    ) -> Self {
        Self {
            config,
            engine,
            host,
            cancel,
        }
    }

    /// `<root>/<directory>/<name>`
    pub fn layout_path(&self, name: &str) -> PathBuf {
        self.host
            .path(&[self.config.directory.as_path(), Path::new(name)])
    }

    /// Render `document` to completion. Returns the number of layers rendered.
    ///
    /// On failure the document keeps the output of the last successful layer.
    pub async fn run(&self, path: &str, document: &mut Document) -> Result<usize, PipelineError> {
        // Prepared
        document.contents.make_text();
        let text = document.contents.as_text().into_owned();
        let mut ctx = RenderContext::build(
            &self.config.params,
            self.host.metadata(),
            &document.attributes,
            &text,
        );
        tracing::debug!(document = path, "converting");

        let mut visited: Vec<String> = Vec::new();
        let mut pending: Option<String> = None;

        let mut output = if self.config.in_place {
            self.render(path, None, RenderSource::Template(&text), &ctx)
                .await?
        } else {
            let name = document
                .template()
                .or(self.config.default_template.as_deref())
                .map(str::to_owned)
                .ok_or_else(|| PipelineError::NoLayout {
                    document: path.to_string(),
                })?;
            let layout_path = self.layout_path(&name);
            visited.push(name.clone());

            if self.host.frontmatter_enabled() {
                let layout = LayoutFile::load(&name, layout_path).await?;
                ctx.layer(&layout.attributes);
                pending = layout.parent().map(str::to_owned);
                self.render(path, Some(&name), RenderSource::Template(&layout.body), &ctx)
                    .await?
            } else {
                self.render(path, Some(&name), RenderSource::File(&layout_path), &ctx)
                    .await?
            }
        };
        let mut layers = 1;

        loop {
            document.contents = Contents::Text(output.clone());

            let Some(parent) = pending.take() else {
                break;
            };
            if self.cancel.is_cancelled() {
                return Err(PipelineError::Cancelled {
                    document: path.to_string(),
                });
            }
            if visited.contains(&parent) {
                visited.push(parent);
                return Err(PipelineError::CyclicLayout {
                    document: path.to_string(),
                    chain: visited,
                });
            }
            tracing::debug!(document = path, layout = %parent, "chaining to parent layout");

            let layout = LayoutFile::load(&parent, self.layout_path(&parent)).await?;
            ctx.layer(&layout.attributes);
            ctx.set_contents(output);
            pending = layout.parent().map(str::to_owned);
            output = self
                .render(path, Some(&parent), RenderSource::Template(&layout.body), &ctx)
                .await?;
            visited.push(parent);
            layers += 1;
        }

        tracing::debug!(document = path, layers, "converted");
        Ok(layers)
    }

    async fn render(
        &self,
        document: &str,
        layout: Option<&str>,
        source: RenderSource<'_>,
        ctx: &RenderContext,
    ) -> Result<String, PipelineError> {
        self.engine
            .render(source, ctx)
            .await
            .map_err(|source| PipelineError::Render {
                document: document.to_string(),
                layout: layout.map(str::to_owned),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Workspace;
    use strata_renderer::TeraEngine;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) {
        let path = dir.path().join("templates").join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, body).unwrap();
    }

    #[tokio::test]
    async fn self_referencing_layout_is_cyclic() {
        let dir = TempDir::new().unwrap();
        write(&dir, "loop.html", "---\ntemplate: loop.html\n---\n{{ contents }}");
        let config = PluginConfig::new("tera").default_template("loop.html");
        let host = Workspace::new(dir.path());
        let cancel = CancellationToken::new();
        let engine = TeraEngine::new();
        let chain = RenderChain::new(&config, &engine, &host, &cancel);

        let mut doc = Document::new("x");
        let err = chain.run("a.md", &mut doc).await.unwrap_err();
        match err {
            PipelineError::CyclicLayout { document, chain } => {
                assert_eq!(document, "a.md");
                assert_eq!(chain, vec!["loop.html", "loop.html"]);
            }
            other => panic!("unexpected error: {other}"),
        }
        // The first layer still landed in the document.
        assert_eq!(doc.contents, Contents::from("x"));
    }

    #[tokio::test]
    async fn cancelled_run_stops_before_parent_layer() {
        let dir = TempDir::new().unwrap();
        write(&dir, "child.html", "---\ntemplate: parent.html\n---\nc[{{ contents }}]");
        write(&dir, "parent.html", "p[{{ contents }}]");
        let config = PluginConfig::new("tera").default_template("child.html");
        let host = Workspace::new(dir.path());
        let cancel = CancellationToken::new();
        cancel.cancel();
        let engine = TeraEngine::new();
        let chain = RenderChain::new(&config, &engine, &host, &cancel);

        let mut doc = Document::new("x");
        let err = chain.run("a.md", &mut doc).await.unwrap_err();
        assert!(matches!(err, PipelineError::Cancelled { .. }));
        assert_eq!(doc.contents, Contents::from("c[x]"));
    }

    #[tokio::test]
    async fn layout_path_is_rooted_in_template_directory() {
        let config = PluginConfig::new("tera").directory("layouts");
        let host = Workspace::new("/site");
        let cancel = CancellationToken::new();
        let engine = TeraEngine::new();
        let chain = RenderChain::new(&config, &engine, &host, &cancel);
        assert_eq!(
            chain.layout_path("page.html"),
            PathBuf::from("/site/layouts/page.html")
        );
    }
}
