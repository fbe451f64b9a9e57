//! Render context: the layered key/value map handed to an engine.
//!
//! Layers, later overriding earlier on key collision:
//!
//! 1. plugin pass-through parameters
//! 2. global metadata
//! 3. document attributes
//! 4. the document's current text under `contents`
//! 5. each resolved layout's front-matter attributes, in chain order
//!
//! Merging is shallow: a colliding key is replaced wholesale.

use serde::Serialize;
use serde_json::Value;

use strata_core::{Attributes, Metadata, CONTENTS_KEY};

use crate::error::RenderError;

/// Ephemeral per-document context. Never shared between documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    values: serde_json::Map<String, Value>,
}

impl RenderContext {
    /// Build the initial context for a document.
    ///
    /// `contents` is the document's prepared text; it is exposed under the
    /// reserved `contents` key after the attribute layers.
    pub fn build(
        params: &Attributes,
        metadata: &Metadata,
        attributes: &Attributes,
        contents: &str,
    ) -> Self {
        let mut ctx = Self::default();
        ctx.layer(params);
        ctx.layer(metadata);
        ctx.layer(attributes);
        ctx.set_contents(contents);
        ctx
    }

    /// Merge `attrs` on top of the current values.
    pub fn layer(&mut self, attrs: &Attributes) {
        for (key, value) in attrs {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Replace the `contents` entry.
    pub fn set_contents(&mut self, contents: impl Into<String>) {
        self.values
            .insert(CONTENTS_KEY.to_string(), Value::String(contents.into()));
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn values(&self) -> &serde_json::Map<String, Value> {
        &self.values
    }

    /// Convert to a [`tera::Context`] for rendering.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        tera::Context::from_serialize(self).map_err(RenderError::from)
    }
}
