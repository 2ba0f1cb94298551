//! Sync command implementation

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::config::KeeperConfig;
use crate::sync::sync_to_target;

#[derive(Args)]
pub struct SyncArgs {
    /// Sync target directory (overrides config sync_target)
    #[arg(short, long, value_name = "DIR")]
    pub target: Option<PathBuf>,
}

pub fn run(config: &KeeperConfig, args: SyncArgs) -> Result<()> {
    let Some(target) = args.target.or_else(|| config.sync_target.clone()) else {
        anyhow::bail!("No sync target configured (set sync_target in config or pass --target)");
    };

    let summary = sync_to_target(&config.data_dir, &config.contexts_dir, &target)?;
    println!("sync to {}: {}", target.display(), summary);
    Ok(())
}
