//! Maintain command implementation: the full pipeline in one invocation.

use anyhow::Result;
use clap::Args;
use console::style;

use super::utils::select_domains;
use crate::config::KeeperConfig;
use crate::docgen::{CommandDocGenerator, GitCloner};
use crate::fetch::GitHubClient;
use crate::pipeline::{run_maintenance, MaintenanceOptions};

#[derive(Args)]
pub struct MaintainArgs {
    /// Maintain a single domain (default: all configured domains)
    #[arg(short, long, value_name = "NAME")]
    pub domain: Option<String>,

    /// Generate at most this many context files per domain
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub generate_limit: usize,

    /// Skip the context-generation step
    #[arg(long)]
    pub skip_generate: bool,
}

pub fn run(config: &KeeperConfig, args: MaintainArgs) -> Result<()> {
    let domains = select_domains(config, args.domain.as_deref())?;
    let domain_refs: Vec<_> = domains.iter().collect();

    let client = GitHubClient::new(&config.fetch)?;
    let source = GitCloner;
    let generator = CommandDocGenerator::new(&config.docgen);
    let options = MaintenanceOptions {
        generate_limit: args.generate_limit,
        skip_generate: args.skip_generate,
    };

    let report = run_maintenance(config, &domain_refs, &client, &source, &generator, &options)?;

    println!(
        "{} {} ok, {} failed",
        style("domains:").bold(),
        report.domains_ok,
        report.domains_failed
    );
    println!("{} {}", style("update:").bold(), report.update);
    if !args.skip_generate {
        println!("{} {}", style("generate:").bold(), report.generate);
    }
    if config.sync_target.is_some() {
        println!("{} {}", style("sync:").bold(), report.sync);
    }

    if report.domains_ok == 0 && report.domains_failed > 0 {
        anyhow::bail!("Maintenance failed for all {} domains", report.domains_failed);
    }
    Ok(())
}
