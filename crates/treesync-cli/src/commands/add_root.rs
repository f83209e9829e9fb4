//! Add-root command
//!
//! Usage: treesync add-root [NAME]

use clap::Args;
use treesync_core::model::DEFAULT_ROOT_NAME;
use treesync_engine::{bootstrap, publish_root};
use treesync_store::SqliteRemote;

use crate::config::Config;

#[derive(Debug, Args)]
pub struct AddRootArgs {
    /// Name of the new root
    #[arg(default_value = DEFAULT_ROOT_NAME)]
    pub name: String,
}

pub async fn execute(config: &Config, args: AddRootArgs) -> Result<(), Box<dyn std::error::Error>> {
    let remote = SqliteRemote::open(&config.db_path)?;
    let mut session = bootstrap(&remote).await?;

    let id = publish_root(&mut session, &remote, args.name).await?;
    println!("✓ Created root {}", id);

    Ok(())
}
