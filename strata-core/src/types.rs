//! Domain types for a Strata run.
//!
//! Documents are keyed by their path in a [`DocumentMap`]. Attribute and
//! metadata maps use `serde_json` values so they can be handed to any
//! template engine without conversion.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

/// Per-document front-matter attributes (and layout attributes).
pub type Attributes = serde_json::Map<String, serde_json::Value>;

/// Global metadata shared read-only by every document of a run.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// The host's document collection, keyed by document path.
pub type DocumentMap = BTreeMap<String, Document>;

/// Attribute key naming the layout a document (or layout) renders through.
pub const TEMPLATE_KEY: &str = "template";

/// Context key under which the current rendered text is exposed to layouts.
pub const CONTENTS_KEY: &str = "contents";

// ---------------------------------------------------------------------------
// Contents
// ---------------------------------------------------------------------------

/// Raw document body: either still binary, or already decoded to text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    Text(String),
    Bytes(Vec<u8>),
}

impl Contents {
    /// Borrow the contents as text, decoding binary as lossy UTF-8.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            Contents::Text(s) => Cow::Borrowed(s.as_str()),
            Contents::Bytes(b) => String::from_utf8_lossy(b),
        }
    }

    /// Decode binary contents to text in place. No-op for text.
    pub fn make_text(&mut self) {
        if let Contents::Bytes(b) = self {
            let text = String::from_utf8_lossy(b).into_owned();
            *self = Contents::Text(text);
        }
    }

    /// Raw bytes of the contents, regardless of representation.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Contents::Text(s) => s.as_bytes(),
            Contents::Bytes(b) => b,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Contents::Text(_))
    }
}

impl Default for Contents {
    fn default() -> Self {
        Contents::Text(String::new())
    }
}

impl From<String> for Contents {
    fn from(s: String) -> Self {
        Contents::Text(s)
    }
}

impl From<&str> for Contents {
    fn from(s: &str) -> Self {
        Contents::Text(s.to_owned())
    }
}

impl From<Vec<u8>> for Contents {
    fn from(b: Vec<u8>) -> Self {
        Contents::Bytes(b)
    }
}

impl fmt::Display for Contents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_text())
    }
}

// ---------------------------------------------------------------------------
// Document
// ---------------------------------------------------------------------------

/// A single document owned by the host collection.
///
/// The render pipeline only ever rewrites `contents`; `attributes` are read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub contents: Contents,
    pub attributes: Attributes,
}

impl Document {
    pub fn new(contents: impl Into<Contents>) -> Self {
        Self {
            contents: contents.into(),
            attributes: Attributes::new(),
        }
    }

    /// Builder-style attribute setter, mostly for hosts and tests.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// The layout named by this document's own `template` attribute, if any.
    pub fn template(&self) -> Option<&str> {
        template_name(&self.attributes)
    }
}

/// Read a non-empty string `template` entry from an attribute map.
pub fn template_name(attributes: &Attributes) -> Option<&str> {
    attributes
        .get(TEMPLATE_KEY)
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn make_text_decodes_bytes_lossily() {
        let mut c = Contents::Bytes(vec![b'h', b'i', 0xff]);
        c.make_text();
        assert!(c.is_text());
        assert_eq!(c.as_text(), "hi\u{fffd}");
    }

    #[test]
    fn make_text_leaves_text_untouched() {
        let mut c = Contents::from("plain");
        c.make_text();
        assert_eq!(c, Contents::Text("plain".to_string()));
    }

    #[test]
    fn template_ignores_non_string_and_empty_values() {
        let doc = Document::new("x").with_attribute("template", json!(3));
        assert_eq!(doc.template(), None);
        let doc = Document::new("x").with_attribute("template", "");
        assert_eq!(doc.template(), None);
        let doc = Document::new("x").with_attribute("template", "page.html");
        assert_eq!(doc.template(), Some("page.html"));
    }
}
