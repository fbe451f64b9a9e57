//! Strata: render documents through layout chains.
//!
//! # Usage
//!
//! ```text
//! strata render [--config strata.yaml] [--source DIR] [--destination DIR] [--dry-run]
//! strata select [--config strata.yaml] [--source DIR] [--json]
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{render::RenderArgs, select::SelectArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "strata",
    version,
    about = "Render documents through templates and layout chains",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render every selected document and write the output tree.
    Render(RenderArgs),

    /// Show which documents take part in rendering and their first layout.
    Select(SelectArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => args.run(),
        Commands::Select(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
