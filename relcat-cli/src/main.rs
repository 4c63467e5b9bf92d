//! relcat — prebuilt archive release catalog.
//!
//! # Usage
//!
//! ```text
//! relcat sync [--workspace <dir>] [--dry-run] [--ci] [--remote <url>] [--branch <name>] [--json]
//! relcat index <data-dir>
//! ```

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{index::IndexArgs, sync::SyncArgs};

// ---------------------------------------------------------------------------
// CLI entry point
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(
    name = "relcat",
    version,
    about = "Catalog prebuilt release archives into a tagged git branch",
    long_about = None,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Copy cached archives, rebuild the index, commit, tag and push.
    Sync(SyncArgs),

    /// Print the index document for a data directory without touching git.
    Index(IndexArgs),
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Commands::Sync(args) => args.run(),
        Commands::Index(args) => args.run(),
    }
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
