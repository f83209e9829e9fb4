//! TreeSync CLI
//!
//! Command-line interface for editing a tree and syncing it to a store

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod script;

#[derive(Debug, Parser)]
#[command(name = "treesync")]
#[command(about = "TreeSync - edit a tree, sync only what changed", long_about = None)]
struct Cli {
    /// Store database path (default: $TREESYNC_DB or .treesync/store.db)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the stored tree without ids
    Show(commands::show::ShowArgs),
    /// Create a root and persist it immediately
    AddRoot(commands::add_root::AddRootArgs),
    /// Apply an edit script and sync the net changes
    Edit(commands::edit::EditArgs),
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = config::Config::load(cli.db);
    treesync_core::logging_facility::init(config.log_profile);

    let result = match cli.command {
        Commands::Show(args) => commands::show::execute(&config, args).await,
        Commands::AddRoot(args) => commands::add_root::execute(&config, args).await,
        Commands::Edit(args) => commands::edit::execute(&config, args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
