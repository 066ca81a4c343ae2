use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Use the library modules
use labfetch::commands;

#[derive(Parser)]
#[clap(name = "labfetch")]
#[clap(about = "Experiment log fetcher for remote compute clusters")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy a snapshot's run directories from the cluster to local storage
    Fetch {
        /// Snapshot to fetch (defaults to the configured default)
        #[clap(long)]
        snapshot: Option<String>,
        /// Destination root for this invocation (overrides the config)
        #[clap(long)]
        dest: Option<PathBuf>,
        /// Print the transfers without invoking rsync
        #[clap(long)]
        dry_run: bool,
        /// Abort on the first failed transfer instead of continuing
        #[clap(long)]
        fail_fast: bool,
    },
    /// Show the ordered transfer plan for a snapshot
    Plan {
        /// Snapshot to plan (defaults to the configured default)
        #[clap(long)]
        snapshot: Option<String>,
    },
    /// List available snapshot manifests
    Snapshots,
    /// Create the labfetch directory, config, and default snapshot manifest
    Init {
        /// Overwrite existing files without prompting
        #[clap(long)]
        force: bool,
    },
    /// Check and report environment setup
    Doctor,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Fetch {
            snapshot,
            dest,
            dry_run,
            fail_fast,
        } => commands::fetch::fetch(snapshot.as_deref(), dest, dry_run, fail_fast)
            .map_err(|e| anyhow::anyhow!(e)),
        Commands::Plan { snapshot } => {
            commands::plan::show_plan(snapshot.as_deref()).map_err(|e| anyhow::anyhow!(e))
        }
        Commands::Snapshots => {
            commands::snapshots::list_snapshots().map_err(|e| anyhow::anyhow!(e))
        }
        Commands::Init { force } => commands::init::init(force).map_err(|e| anyhow::anyhow!(e)),
        Commands::Doctor => {
            commands::doctor::check_environment().map_err(|e| anyhow::anyhow!(e))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}
