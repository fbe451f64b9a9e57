//! Concurrency driver: fans render chains out over a document map.
//!
//! All chains of a run are polled by the calling task through a bounded
//! `buffer_unordered` window, so documents interleave at engine and layout
//! read suspension points without sharing any state.
//!
//! The first chain error cancels the run's [`CancellationToken`]: documents
//! not yet admitted to the window are skipped and in-flight chains stop
//! before their next parent layer. The driver still drains the window
//! before reporting that first error, so no chain is dropped mid-layer.

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

use strata_core::DocumentMap;

use crate::chain::RenderChain;
use crate::error::PipelineError;
use crate::host::Host;
use crate::plugin::TemplatesPlugin;

/// Counts for a successful run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Documents that passed selection.
    pub selected: usize,
    /// Selected documents whose chain reached `Done`.
    pub rendered: usize,
    /// Documents left untouched by selection.
    pub skipped: usize,
    /// Total layers rendered across all documents.
    pub layers: usize,
}

pub(crate) async fn drive(
    plugin: &TemplatesPlugin,
    documents: &mut DocumentMap,
    host: &dyn Host,
) -> Result<RunSummary, PipelineError> {
    let total = documents.len();
    let selector = plugin.selector();
    let mut selected: Vec<_> = documents
        .iter_mut()
        .filter(|(path, doc)| selector.should_render(path, doc))
        .collect();

    for (path, doc) in selected.iter_mut() {
        tracing::trace!(document = path.as_str(), "stringifying");
        doc.contents.make_text();
    }

    let mut summary = RunSummary {
        selected: selected.len(),
        skipped: total - selected.len(),
        ..RunSummary::default()
    };

    let cancel = CancellationToken::new();
    let chain = RenderChain::new(plugin.config(), plugin.engine(), host, &cancel);
    let chain = &chain;
    let token = &cancel;

    let mut results = stream::iter(selected)
        .map(move |(path, doc)| {
            let admitted = !token.is_cancelled();
            async move {
                let result = if admitted {
                    chain.run(path, doc).await
                } else {
                    Err(PipelineError::Cancelled {
                        document: path.clone(),
                    })
                };
                (path, result)
            }
        })
        .buffer_unordered(plugin.options().concurrency.max(1));

    let mut first_error: Option<PipelineError> = None;
    while let Some((path, result)) = results.next().await {
        match result {
            Ok(layers) => {
                summary.rendered += 1;
                summary.layers += layers;
            }
            Err(PipelineError::Cancelled { .. }) => {
                tracing::debug!(document = path.as_str(), "skipped after cancellation");
            }
            Err(err) if first_error.is_none() => {
                tracing::warn!(document = path.as_str(), error = %err, "render failed; cancelling run");
                cancel.cancel();
                first_error = Some(err);
            }
            Err(err) => {
                tracing::debug!(document = path.as_str(), error = %err, "further failure after cancellation");
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(summary),
    }
}
