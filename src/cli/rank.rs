//! Rank command implementation

use anyhow::Result;
use clap::Args;

use super::utils::select_domains;
use crate::config::KeeperConfig;
use crate::pipeline;

#[derive(Args)]
pub struct RankArgs {
    /// Re-rank a single domain (default: all configured domains)
    #[arg(short, long, value_name = "NAME")]
    pub domain: Option<String>,
}

pub fn run(config: &KeeperConfig, args: RankArgs) -> Result<()> {
    let domains = select_domains(config, args.domain.as_deref())?;

    let mut failed = 0usize;
    for domain in &domains {
        match pipeline::rank_domain(config, domain) {
            Ok(summary) => println!("{}: {}", domain.name, summary),
            Err(e) => {
                tracing::error!("rank failed for {}: {e:#}", domain.name);
                println!("{}: failed", domain.name);
                failed += 1;
            }
        }
    }

    if failed == domains.len() {
        anyhow::bail!("All {} domain re-ranks failed", domains.len());
    }
    Ok(())
}
