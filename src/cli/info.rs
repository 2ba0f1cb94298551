//! Info command implementation

use anyhow::Result;
use clap::Args;

use super::utils::select_domains;
use crate::config::KeeperConfig;
use crate::store;

#[derive(Args)]
pub struct InfoArgs {
    /// Show a single domain (default: all configured domains)
    #[arg(short, long, value_name = "NAME")]
    pub domain: Option<String>,
}

pub fn run(config: &KeeperConfig, args: InfoArgs) -> Result<()> {
    let domains = select_domains(config, args.domain.as_deref())?;

    for domain in &domains {
        let data_file = config.data_file(&domain.name);
        println!("Domain: {}", domain.name);
        if !domain.description.is_empty() {
            println!("  {}", domain.description);
        }

        let Ok(list) = store::load(&data_file) else {
            println!("  No persisted data ({})", data_file.display());
            continue;
        };

        let with_context = list.libraries.iter().filter(|r| r.has_context_file).count();
        println!("Statistics:");
        println!("  Libraries: {}", list.libraries.len());
        println!("  Context files: {}/{}", with_context, list.libraries.len());
        if !list.keywords.is_empty() {
            println!("  Keywords: {}", list.keywords.join(", "));
        }
        if !domain.pinned.is_empty() {
            println!("  Pinned: {}", domain.pinned.join(", "));
        }

        let top: Vec<_> = list.libraries.iter().take(10).collect();
        if !top.is_empty() {
            println!("Top libraries:");
            for record in top {
                let marker = if record.has_context_file { "*" } else { " " };
                println!(
                    "  {:>4}. {} ({} stars){}",
                    record.rank,
                    record.name,
                    record.stars,
                    marker
                );
            }
        }
        println!();
    }

    Ok(())
}
