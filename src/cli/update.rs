//! Update command implementation

use anyhow::Result;
use clap::Args;

use super::utils::select_domains;
use crate::config::KeeperConfig;
use crate::fetch::GitHubClient;
use crate::pipeline;

#[derive(Args)]
pub struct UpdateArgs {
    /// Update a single domain (default: all configured domains)
    #[arg(short, long, value_name = "NAME")]
    pub domain: Option<String>,

    /// Override the fetch candidate limit for this run
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Override the minimum star cutoff for this run
    #[arg(long, value_name = "STARS")]
    pub min_stars: Option<u64>,
}

pub fn run(config: &KeeperConfig, args: UpdateArgs) -> Result<()> {
    let mut config = config.clone();
    if let Some(limit) = args.limit {
        config.fetch.limit = limit;
    }
    if let Some(min_stars) = args.min_stars {
        config.fetch.min_stars = min_stars;
    }

    let domains = select_domains(&config, args.domain.as_deref())?;
    let client = GitHubClient::new(&config.fetch)?;

    let mut failed = 0usize;
    for domain in &domains {
        match pipeline::update_domain(&config, domain, &client) {
            Ok(summary) => println!("{}: {}", domain.name, summary),
            Err(e) => {
                tracing::error!("update failed for {}: {e:#}", domain.name);
                println!("{}: failed", domain.name);
                failed += 1;
            }
        }
    }

    if failed == domains.len() {
        anyhow::bail!("All {} domain updates failed", domains.len());
    }
    Ok(())
}
