//! Show command
//!
//! Usage: treesync show [--indented]

use clap::Args;
use treesync_core::render::render;
use treesync_engine::bootstrap;
use treesync_store::SqliteRemote;

use crate::config::Config;

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Four-space indented JSON instead of the compact form
    #[arg(long)]
    pub indented: bool,
}

pub async fn execute(config: &Config, args: ShowArgs) -> Result<(), Box<dyn std::error::Error>> {
    let remote = SqliteRemote::open(&config.db_path)?;
    let session = bootstrap(&remote).await?;

    println!("{}", render(session.forest(), super::render_mode(args.indented))?);

    Ok(())
}
