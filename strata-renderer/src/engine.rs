//! Template engine adapters: the [`TemplateEngine`] trait and [`TeraEngine`].
//!
//! An adapter is an opaque `render(source, context) -> String` capability.
//! It is invoked in one of two modes:
//!
//! | Mode            | Source                         | Used when                            |
//! |-----------------|--------------------------------|--------------------------------------|
//! | template-string | template text held in memory   | in-place rendering, parsed layouts   |
//! | render-file     | path to a template on disk     | layouts without front-matter parsing |

use std::path::Path;

use async_trait::async_trait;
use strata_core::files_under;
use tera::Tera;

use crate::context::RenderContext;
use crate::error::{io_err, RenderError};

// ---------------------------------------------------------------------------
// RenderSource
// ---------------------------------------------------------------------------

/// What an engine is asked to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderSource<'a> {
    /// Template text, rendered as-is.
    Template(&'a str),
    /// A template file, read by the engine.
    File(&'a Path),
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// A pluggable templating engine.
///
/// Implementations must not keep per-render state: one instance is shared by
/// every document of a run.
#[async_trait]
pub trait TemplateEngine: Send + Sync {
    /// Registry name (`tera`, `handlebars`, ...).
    fn name(&self) -> &str;

    /// Render template text against `context`.
    async fn render_str(&self, source: &str, context: &RenderContext)
        -> Result<String, RenderError>;

    /// Render the template stored at `path`.
    ///
    /// The default reads the file without blocking and defers to
    /// [`render_str`](Self::render_str).
    async fn render_file(&self, path: &Path, context: &RenderContext) -> Result<String, RenderError> {
        let source = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| io_err(path, e))?;
        self.render_str(&source, context).await
    }

    /// Dispatch on the [`RenderSource`] mode.
    async fn render(
        &self,
        source: RenderSource<'_>,
        context: &RenderContext,
    ) -> Result<String, RenderError> {
        match source {
            RenderSource::Template(text) => self.render_str(text, context).await,
            RenderSource::File(path) => self.render_file(path, context).await,
        }
    }
}

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

/// Every file under `dir`, named by its `/`-separated relative path.
fn load_named_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    files_under(dir)?
        .into_iter()
        .map(|file| {
            let body = std::fs::read_to_string(&file.path).map_err(|e| io_err(&file.path, e))?;
            Ok((file.key, body))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// TeraEngine
// ---------------------------------------------------------------------------

/// Tera adapter.
///
/// Output is never auto-escaped: layouts receive already-rendered HTML in
/// `contents`. With [`TeraEngine::with_template_dir`] every file under the
/// directory is registered by its relative path, so templates can
/// `{% include %}` or `{% extends %}` one another.
#[derive(Clone)]
pub struct TeraEngine {
    tera: Tera,
}

impl Default for TeraEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TeraEngine {
    pub fn new() -> Self {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        TeraEngine { tera }
    }

    /// Construct a [`TeraEngine`] with every file under `dir` registered.
    pub fn with_template_dir(dir: &Path) -> Result<Self, RenderError> {
        let mut engine = Self::new();
        engine.tera.add_raw_templates(load_named_templates(dir)?)?;
        Ok(engine)
    }
}

#[async_trait]
impl TemplateEngine for TeraEngine {
    fn name(&self) -> &str {
        "tera"
    }

    async fn render_str(&self, source: &str, context: &RenderContext) -> Result<String, RenderError> {
        let tera_ctx = context.to_tera_context()?;
        // One-off templates are registered on the instance, so render on a copy.
        let mut tera = self.tera.clone();
        Ok(tera.render_str(source, &tera_ctx)?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
