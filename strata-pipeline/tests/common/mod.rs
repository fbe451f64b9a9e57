//! Shared fixtures for pipeline integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use strata_core::{Attributes, PluginConfig};
use strata_pipeline::TemplatesPlugin;
use strata_renderer::{EngineRegistry, RenderContext, RenderError, TemplateEngine};
use tempfile::TempDir;

/// One recorded engine invocation.
#[derive(Debug, Clone)]
pub struct Call {
    pub source: String,
    pub file: bool,
    pub context: serde_json::Map<String, Value>,
}

/// Engine that records every call and renders `<source>contents`.
///
/// Any source containing `FAIL` is reported as a render error.
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<Call>>,
}

impl Recorder {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, source: &str, file: bool, context: &RenderContext) {
        self.calls.lock().unwrap().push(Call {
            source: source.to_string(),
            file,
            context: context.values().clone(),
        });
    }
}

pub fn expected(source: &str, contents: &str) -> String {
    format!("<{source}>{contents}")
}

#[async_trait]
impl TemplateEngine for Recorder {
    fn name(&self) -> &str {
        "recorder"
    }

    async fn render_str(&self, source: &str, context: &RenderContext) -> Result<String, RenderError> {
        self.record(source, false, context);
        tokio::task::yield_now().await;
        if source.contains("FAIL") {
            return Err(RenderError::Io {
                path: PathBuf::from(source),
                source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
            });
        }
        let contents = context
            .get("contents")
            .and_then(Value::as_str)
            .unwrap_or_default();
        Ok(expected(source, contents))
    }

    async fn render_file(&self, path: &Path, context: &RenderContext) -> Result<String, RenderError> {
        self.record(&path.display().to_string(), true, context);
        Ok(format!("file:{}", path.display()))
    }
}

/// Plugin backed by a fresh [`Recorder`].
pub fn recorder_plugin(config: PluginConfig) -> (TemplatesPlugin, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::default());
    let mut engines = EngineRegistry::new();
    engines.register("recorder", recorder.clone());
    let plugin = TemplatesPlugin::new(config, &engines).expect("plugin");
    (plugin, recorder)
}

/// Write `body` to `<root>/templates/<name>`.
pub fn write_layout(root: &TempDir, name: &str, body: &str) {
    let path = root.path().join("templates").join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

pub fn attrs(value: Value) -> Attributes {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}
