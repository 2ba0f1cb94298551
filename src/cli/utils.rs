//! Shared CLI utilities.

use crate::config::{DomainConfig, KeeperConfig};
use anyhow::Result;

/// Resolve `--domain` to the configured domains it addresses: one named
/// domain, or every configured domain when omitted.
pub fn select_domains(config: &KeeperConfig, name: Option<&str>) -> Result<Vec<DomainConfig>> {
    match name {
        Some(name) => {
            let Some(domain) = config.domain(name) else {
                anyhow::bail!("Unknown domain: {name} (not in config)");
            };
            Ok(vec![domain.clone()])
        }
        None => {
            if config.domains.is_empty() {
                anyhow::bail!("No domains configured (create context-keeper.toml)");
            }
            Ok(config.domains.clone())
        }
    }
}
