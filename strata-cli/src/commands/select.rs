//! `strata select`: show which documents take part in rendering.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use strata_core::DocumentMap;
use strata_pipeline::read_documents;

use super::{Site, SiteArgs};

/// Arguments for `strata select`.
#[derive(Args, Debug)]
pub struct SelectArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, Serialize)]
struct SelectionRow {
    path: String,
    selected: bool,
    /// First layout, `None` for in-place or unselected documents.
    layout: Option<String>,
}

#[derive(Tabled)]
struct SelectionTableRow {
    #[tabled(rename = "document")]
    path: String,
    #[tabled(rename = "selected")]
    selected: String,
    #[tabled(rename = "layout")]
    layout: String,
}

impl SelectArgs {
    pub fn run(self) -> Result<()> {
        let site = Site::load(&self.site)?;
        let documents = read_documents(&site.source, site.config.frontmatter)
            .with_context(|| format!("failed to read {}", site.source.display()))?;
        let rows = build_rows(&site, &documents);

        if self.json {
            println!("{}", serde_json::to_string_pretty(&rows)?);
            return Ok(());
        }
        print_table(&rows, site.plugin.config().in_place);
        Ok(())
    }
}

fn build_rows(site: &Site, documents: &DocumentMap) -> Vec<SelectionRow> {
    let selector = site.plugin.selector();
    let in_place = site.plugin.config().in_place;
    documents
        .iter()
        .map(|(path, doc)| {
            let selected = selector.should_render(path, doc);
            let layout = if selected && !in_place {
                selector.layout_for(doc).map(str::to_owned)
            } else {
                None
            };
            SelectionRow {
                path: path.clone(),
                selected,
                layout,
            }
        })
        .collect()
}

fn print_table(rows: &[SelectionRow], in_place: bool) {
    if rows.is_empty() {
        println!("No documents found.");
        return;
    }
    let table_rows: Vec<SelectionTableRow> = rows
        .iter()
        .map(|r| SelectionTableRow {
            path: r.path.clone(),
            selected: if r.selected {
                "yes".green().to_string()
            } else {
                "no".dimmed().to_string()
            },
            layout: match (&r.layout, r.selected && in_place) {
                (Some(name), _) => name.clone(),
                (None, true) => "(in place)".to_string(),
                (None, false) => "-".to_string(),
            },
        })
        .collect();
    println!("{}", Table::new(table_rows).with(Style::rounded()));

    let selected = rows.iter().filter(|r| r.selected).count();
    println!("{} of {} documents selected", selected, rows.len());
}
