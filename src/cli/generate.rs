//! Generate command implementation

use anyhow::Result;
use clap::Args;

use super::utils::select_domains;
use crate::config::KeeperConfig;
use crate::docgen::{CommandDocGenerator, GitCloner};
use crate::pipeline;

#[derive(Args)]
pub struct GenerateArgs {
    /// Generate for a single domain (default: all configured domains)
    #[arg(short, long, value_name = "NAME")]
    pub domain: Option<String>,

    /// Generate at most this many context files per domain
    #[arg(short, long, value_name = "N", default_value_t = 10)]
    pub limit: usize,

    /// Regenerate even when a context file already exists
    #[arg(short, long)]
    pub force: bool,
}

pub fn run(config: &KeeperConfig, args: GenerateArgs) -> Result<()> {
    let domains = select_domains(config, args.domain.as_deref())?;
    let source = GitCloner;
    let generator = CommandDocGenerator::new(&config.docgen);

    let mut failed = 0usize;
    for domain in &domains {
        match pipeline::generate_contexts(
            config,
            domain,
            &source,
            &generator,
            args.limit,
            args.force,
        ) {
            Ok(summary) => println!("{}: {}", domain.name, summary),
            Err(e) => {
                tracing::error!("generate failed for {}: {e:#}", domain.name);
                println!("{}: failed", domain.name);
                failed += 1;
            }
        }
    }

    if failed == domains.len() {
        anyhow::bail!("Context generation failed for all {} domains", domains.len());
    }
    Ok(())
}
