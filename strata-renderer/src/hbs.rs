//! Handlebars adapter.

use async_trait::async_trait;
use handlebars::Handlebars;

use crate::context::RenderContext;
use crate::engine::TemplateEngine;
use crate::error::RenderError;

/// Handlebars adapter. Like [`TeraEngine`](crate::TeraEngine), output is
/// not HTML-escaped.
pub struct HandlebarsEngine {
    registry: Handlebars<'static>,
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HandlebarsEngine {
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.register_escape_fn(handlebars::no_escape);
        HandlebarsEngine { registry }
    }
}

#[async_trait]
impl TemplateEngine for HandlebarsEngine {
    fn name(&self) -> &str {
        "handlebars"
    }

    async fn render_str(&self, source: &str, context: &RenderContext) -> Result<String, RenderError> {
        Ok(self.registry.render_template(source, context)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::Attributes;

    #[tokio::test]
    async fn renders_with_context_values() {
        let mut params = Attributes::new();
        params.insert("site".into(), "Example".into());
        let ctx = RenderContext::build(&params, &Attributes::new(), &Attributes::new(), "<p>hi</p>");
        let out = HandlebarsEngine::new()
            .render_str("{{site}}: {{contents}}", &ctx)
            .await
            .expect("render");
        assert_eq!(out, "Example: <p>hi</p>");
    }

    #[tokio::test]
    async fn unclosed_block_is_an_error() {
        let ctx = RenderContext::default();
        let err = HandlebarsEngine::new()
            .render_str("{{#if x}}open", &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::Handlebars(_)));
    }
}
