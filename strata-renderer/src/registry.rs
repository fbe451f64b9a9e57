//! Engine registry: maps the configured `engine` name to an adapter.

use std::collections::HashMap;
use std::sync::Arc;

use strata_core::{ConfigError, PluginConfig};

use crate::engine::{TemplateEngine, TeraEngine};
use crate::hbs::HandlebarsEngine;

/// Named set of template engine adapters.
#[derive(Clone, Default)]
pub struct EngineRegistry {
    engines: HashMap<String, Arc<dyn TemplateEngine>>,
}

impl EngineRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in `tera` and `handlebars` adapters.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register("tera", Arc::new(TeraEngine::new()));
        registry.register("handlebars", Arc::new(HandlebarsEngine::new()));
        registry
    }

    /// Register (or replace) the adapter for `name`.
    pub fn register(&mut self, name: impl Into<String>, engine: Arc<dyn TemplateEngine>) {
        self.engines.insert(name.into(), engine);
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn TemplateEngine>> {
        self.engines.get(name).cloned()
    }

    /// Resolve the adapter a plugin config asks for.
    ///
    /// Fails with `MissingEngine` when no engine is configured and
    /// `UnknownEngine` when nothing is registered under the name.
    pub fn resolve(&self, config: &PluginConfig) -> Result<Arc<dyn TemplateEngine>, ConfigError> {
        let name = config.engine_name()?;
        self.get(name).ok_or_else(|| ConfigError::UnknownEngine {
            name: name.to_string(),
        })
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.engines.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
