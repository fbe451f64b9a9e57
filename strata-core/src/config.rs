//! Plugin and site configuration.
//!
//! # File layout
//!
//! ```text
//! <root>/
//!   strata.yaml      (site config: source, destination, metadata, templates)
//!   src/             (documents)
//!   templates/       (layouts, relative to <root>)
//! ```
//!
//! The `templates` block is a [`PluginConfig`]. Its five recognised keys are
//! typed fields; every other key lands in [`PluginConfig::params`] and is
//! passed verbatim into each document's render context. A bare string
//! (`templates: tera`) is shorthand for `{ engine: tera }`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{io_err, ConfigError};
use crate::types::{Attributes, Metadata};

/// Default layout directory, relative to the host root.
pub const DEFAULT_DIRECTORY: &str = "templates";

/// Default number of documents rendered concurrently.
pub const DEFAULT_CONCURRENCY: usize = 16;

// ---------------------------------------------------------------------------
// PatternSpec
// ---------------------------------------------------------------------------

/// A single glob or an ordered list of globs; `!`-prefixed entries negate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PatternSpec {
    One(String),
    Many(Vec<String>),
}

impl PatternSpec {
    pub fn entries(&self) -> &[String] {
        match self {
            PatternSpec::One(p) => std::slice::from_ref(p),
            PatternSpec::Many(ps) => ps,
        }
    }
}

impl From<&str> for PatternSpec {
    fn from(s: &str) -> Self {
        PatternSpec::One(s.to_owned())
    }
}

impl From<Vec<&str>> for PatternSpec {
    fn from(v: Vec<&str>) -> Self {
        PatternSpec::Many(v.into_iter().map(str::to_owned).collect())
    }
}

// ---------------------------------------------------------------------------
// PluginConfig
// ---------------------------------------------------------------------------

/// Configuration for one templates plugin instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPluginConfig")]
pub struct PluginConfig {
    /// Engine name; required, checked when the plugin is constructed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    /// Layout directory, joined onto the host root.
    pub directory: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<PatternSpec>,
    #[serde(rename = "inPlace")]
    pub in_place: bool,
    #[serde(rename = "default", skip_serializing_if = "Option::is_none")]
    pub default_template: Option<String>,
    /// Pass-through template data.
    #[serde(flatten)]
    pub params: Attributes,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            engine: None,
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            pattern: None,
            in_place: false,
            default_template: None,
            params: Attributes::new(),
        }
    }
}

impl PluginConfig {
    /// Config for `engine` with every other option at its default.
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: Some(engine.into()),
            ..Self::default()
        }
    }

    pub fn directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directory = dir.into();
        self
    }

    pub fn pattern(mut self, pattern: impl Into<PatternSpec>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn in_place(mut self, in_place: bool) -> Self {
        self.in_place = in_place;
        self
    }

    pub fn default_template(mut self, name: impl Into<String>) -> Self {
        self.default_template = Some(name.into());
        self
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// The configured engine name, or [`ConfigError::MissingEngine`].
    pub fn engine_name(&self) -> Result<&str, ConfigError> {
        self.engine
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or(ConfigError::MissingEngine)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPluginConfig {
    Engine(String),
    Options(PluginOptions),
}

#[derive(Deserialize)]
struct PluginOptions {
    #[serde(default)]
    engine: Option<String>,
    #[serde(default = "default_directory")]
    directory: PathBuf,
    #[serde(default)]
    pattern: Option<PatternSpec>,
    #[serde(default, rename = "inPlace", alias = "in_place")]
    in_place: bool,
    #[serde(default, rename = "default")]
    default_template: Option<String>,
    #[serde(flatten)]
    params: Attributes,
}

impl From<RawPluginConfig> for PluginConfig {
    fn from(raw: RawPluginConfig) -> Self {
        match raw {
            RawPluginConfig::Engine(engine) => PluginConfig::new(engine),
            RawPluginConfig::Options(o) => PluginConfig {
                engine: o.engine,
                directory: o.directory,
                pattern: o.pattern,
                in_place: o.in_place,
                default_template: o.default_template,
                params: o.params,
            },
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from(DEFAULT_DIRECTORY)
}

// ---------------------------------------------------------------------------
// SiteConfig
// ---------------------------------------------------------------------------

/// Root of a `strata.yaml` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_source")]
    pub source: PathBuf,
    #[serde(default = "default_destination")]
    pub destination: PathBuf,
    /// Whether documents and layouts carry front matter.
    #[serde(default = "default_true")]
    pub frontmatter: bool,
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
    #[serde(default)]
    pub metadata: Metadata,
    pub templates: PluginConfig,
}

impl SiteConfig {
    /// Load a site config from `path`.
    ///
    /// Returns `ConfigError::Io` if unreadable and `ConfigError::Parse`
    /// (with path + line context) if malformed YAML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| io_err(path, e))?;
        Self::from_yaml(&contents, path)
    }

    /// Parse a site config; `origin` is only used for error context.
    pub fn from_yaml(yaml: &str, origin: &Path) -> Result<Self, ConfigError> {
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }
}

fn default_source() -> PathBuf {
    PathBuf::from("src")
}

fn default_destination() -> PathBuf {
    PathBuf::from("build")
}

fn default_true() -> bool {
    true
}

fn default_concurrency() -> usize {
    DEFAULT_CONCURRENCY
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
