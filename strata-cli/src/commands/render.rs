//! `strata render`: render the source tree and write the output tree.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use strata_pipeline::{read_documents, write_documents, WriteResult};

use super::{Site, SiteArgs};

/// Arguments for `strata render`.
#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Write output to DIR instead of the config's `destination`.
    /// Resolved against the current directory.
    #[arg(long, value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,
}

impl RenderArgs {
    pub fn run(self) -> Result<()> {
        let site = Site::load(&self.site)?;
        let destination = self
            .destination
            .clone()
            .unwrap_or_else(|| site.root.join(&site.config.destination));

        let mut documents = read_documents(&site.source, site.config.frontmatter)
            .with_context(|| format!("failed to read {}", site.source.display()))?;
        let summary = site
            .plugin
            .run_blocking(&mut documents, &site.workspace)
            .context("render failed")?;
        let writes = write_documents(&documents, &destination, self.dry_run)
            .with_context(|| format!("failed to write {}", destination.display()))?;

        let prefix = if self.dry_run { "[dry-run] " } else { "" };
        println!(
            "{prefix}✓ rendered {} of {} documents ({} layers)",
            summary.rendered,
            summary.selected + summary.skipped,
            summary.layers
        );
        print_writes(&writes);
        Ok(())
    }
}

fn print_writes(writes: &[WriteResult]) {
    for w in writes {
        match w {
            WriteResult::Written { path } => println!("  ✎  {}", path.display()),
            WriteResult::WouldWrite { path } => println!("  ~  {}", path.display()),
            WriteResult::Unchanged { path } => println!("  ·  {}", path.display()),
        }
    }
}
