//! Subcommands and the site loading they share.

pub mod render;
pub mod select;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use strata_core::SiteConfig;
use strata_pipeline::{RunOptions, TemplatesPlugin, Workspace};
use strata_renderer::{EngineRegistry, TeraEngine};

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct SiteArgs {
    /// Path to the site config file.
    #[arg(long, short, default_value = "strata.yaml")]
    pub config: PathBuf,

    /// Read documents from DIR instead of the config's `source`.
    /// Resolved against the current directory; config paths resolve against
    /// the config file's directory.
    #[arg(long, value_name = "DIR")]
    pub source: Option<PathBuf>,
}

/// A loaded site: config, its root directory, and a ready plugin.
pub struct Site {
    pub config: SiteConfig,
    pub root: PathBuf,
    pub plugin: TemplatesPlugin,
    pub workspace: Workspace,
    pub source: PathBuf,
}

impl Site {
    /// Load `args.config` and build the templates plugin it describes.
    ///
    /// Relative paths in the config resolve against the config's directory;
    /// command-line overrides are taken as given.
    pub fn load(args: &SiteArgs) -> Result<Self> {
        let config = SiteConfig::load(&args.config)
            .with_context(|| format!("failed to load {}", args.config.display()))?;
        let root = config_root(&args.config);

        let engines = engine_registry(&config, &root)?;
        let plugin = TemplatesPlugin::new(config.templates.clone(), &engines)
            .context("invalid templates configuration")?
            .with_options(RunOptions {
                concurrency: config.concurrency,
            });
        let workspace = Workspace::new(&root)
            .with_metadata(config.metadata.clone())
            .with_frontmatter(config.frontmatter);
        let source = args
            .source
            .clone()
            .unwrap_or_else(|| root.join(&config.source));
        tracing::debug!(
            root = %root.display(),
            source = %source.display(),
            engine = plugin.engine().name(),
            "site loaded"
        );

        Ok(Site {
            config,
            root,
            plugin,
            workspace,
            source,
        })
    }
}

fn config_root(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Built-in engines; Tera additionally gets the layout directory registered
/// so layouts can include one another.
fn engine_registry(config: &SiteConfig, root: &Path) -> Result<EngineRegistry> {
    let mut engines = EngineRegistry::builtin();
    if config.templates.engine.as_deref() == Some("tera") {
        let dir = root.join(&config.templates.directory);
        let tera = TeraEngine::with_template_dir(&dir)
            .with_context(|| format!("failed to load templates from {}", dir.display()))?;
        engines.register("tera", Arc::new(tera));
    }
    Ok(engines)
}
