//! Edit command
//!
//! Usage: treesync edit <SCRIPT> [--dry-run] [--indented]
//!
//! Runs every line of the script against a session loaded from the store,
//! prints the resulting snapshot, then syncs the net changes. A failing
//! line aborts before anything is sent.

use clap::Args;
use std::path::PathBuf;
use treesync_core::apply;
use treesync_engine::{bootstrap, export_batch, sync};
use treesync_store::SqliteRemote;

use crate::config::Config;
use crate::script;

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Edit script path
    pub script: PathBuf,

    /// Print the pending changes instead of syncing them
    #[arg(long)]
    pub dry_run: bool,

    /// Four-space indented snapshot instead of the compact form
    #[arg(long)]
    pub indented: bool,
}

pub async fn execute(config: &Config, args: EditArgs) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(&args.script)?;
    let lines = script::parse(&text)?;

    let remote = SqliteRemote::open(&config.db_path)?;
    let mut session = bootstrap(&remote).await?;

    for line in &lines {
        let command = line.to_command(session.forest())?;
        session = apply(session, command).map_err(|source| script::ScriptError::Step {
            line: line.line,
            source,
        })?;
    }

    let batch = export_batch(
        session.forest(),
        session.changes(),
        super::render_mode(args.indented),
    )?;
    println!("{}", batch.snapshot);

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(session.changes())?);
        return Ok(());
    }

    let report = sync(&mut session, &remote).await?;
    println!(
        "✓ Synced: {} created, {} updated, {} deleted",
        report.created, report.updated, report.deleted
    );

    Ok(())
}
