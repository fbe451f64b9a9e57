//! The templates plugin: configured once, run against document maps.

use std::sync::Arc;

use strata_core::{ConfigError, DocumentMap, PluginConfig, Selector, DEFAULT_CONCURRENCY};
use strata_renderer::{EngineRegistry, TemplateEngine};

use crate::driver::{self, RunSummary};
use crate::error::PipelineError;
use crate::host::Host;

/// Knobs for the concurrency driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Maximum number of documents rendering at once.
    pub concurrency: usize,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// A configured templates plugin.
///
/// Construction validates everything that can be checked up front: the
/// engine must be named and registered, and every pattern must compile.
pub struct TemplatesPlugin {
    config: PluginConfig,
    selector: Selector,
    engine: Arc<dyn TemplateEngine>,
    options: RunOptions,
}

impl TemplatesPlugin {
    pub fn new(config: PluginConfig, engines: &EngineRegistry) -> Result<Self, ConfigError> {
        let engine = engines.resolve(&config)?;
        let selector = Selector::compile(&config)?;
        Ok(Self {
            config,
            selector,
            engine,
            options: RunOptions::default(),
        })
    }

    pub fn with_options(mut self, options: RunOptions) -> Self {
        self.options = options;
        self
    }

    pub fn config(&self) -> &PluginConfig {
        &self.config
    }

    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    pub fn engine(&self) -> &dyn TemplateEngine {
        self.engine.as_ref()
    }

    pub fn options(&self) -> RunOptions {
        self.options
    }

    /// Render every selected document in `documents`.
    ///
    /// Completes once with either a summary or the first error observed.
    /// Documents rendered before a failure keep their new contents.
    pub async fn run(
        &self,
        documents: &mut DocumentMap,
        host: &dyn Host,
    ) -> Result<RunSummary, PipelineError> {
        driver::drive(self, documents, host).await
    }

    /// [`run`](Self::run) on a fresh current-thread runtime.
    pub fn run_blocking(
        &self,
        documents: &mut DocumentMap,
        host: &dyn Host,
    ) -> Result<RunSummary, PipelineError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(PipelineError::Runtime)?;
        runtime.block_on(self.run(documents, host))
    }
}
