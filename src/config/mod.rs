//! Configuration: one explicit object passed into every step.
//!
//! Replaces the ad-hoc per-script domain tables of earlier tooling; loading
//! and saving are distinct, explicit steps and nothing mutates global state.

pub mod loader;

pub use loader::load_config;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration, loaded once and passed by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeeperConfig {
    /// Directory holding one `<domain>.json` per domain.
    pub data_dir: PathBuf,
    /// Directory holding generated context files.
    pub contexts_dir: PathBuf,
    /// Frontend data directory for the sync step.
    pub sync_target: Option<PathBuf>,
    pub fetch: FetchSettings,
    pub docgen: DocgenSettings,
    #[serde(rename = "domain")]
    pub domains: Vec<DomainConfig>,
}

impl Default for KeeperConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            contexts_dir: PathBuf::from("contexts"),
            sync_target: None,
            fetch: FetchSettings::default(),
            docgen: DocgenSettings::default(),
            domains: Vec::new(),
        }
    }
}

impl KeeperConfig {
    pub fn domain(&self, name: &str) -> Option<&DomainConfig> {
        self.domains.iter().find(|d| d.name.eq_ignore_ascii_case(name))
    }

    /// Path of the persisted list for a domain.
    pub fn data_file(&self, domain: &str) -> PathBuf {
        self.data_dir.join(format!("{domain}.json"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchSettings {
    /// Maximum candidates pulled from the search API per domain.
    pub limit: usize,
    /// Search cutoff; repositories below this are never returned.
    pub min_stars: u64,
    /// Bounded pool size for the parallel star refresh.
    pub workers: usize,
    /// Fixed delay before each API request, to stay under rate limits.
    pub delay_ms: u64,
    /// Environment variable consulted for an API token.
    pub token_env: String,
    pub timeout_secs: u64,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            limit: 100,
            min_stars: 0,
            workers: 4,
            delay_ms: 250,
            token_env: "GITHUB_TOKEN".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocgenSettings {
    /// External documentation-generation command; receives the cloned
    /// repository path as its final argument and writes the context to stdout.
    pub command: String,
    pub args: Vec<String>,
}

impl Default for DocgenSettings {
    fn default() -> Self {
        Self { command: "repo-context".to_string(), args: vec!["export".to_string()] }
    }
}

/// One topical category with its own ranked list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainConfig {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Repositories that must always appear in this domain's list, found by
    /// the fetch step or not.
    #[serde(default)]
    pub pinned: Vec<String>,
}

impl DomainConfig {
    pub fn pinned_set(&self) -> std::collections::BTreeSet<String> {
        self.pinned.iter().map(|s| s.trim().to_string()).collect()
    }
}

/// Resolve relative directories against the directory the config file was
/// loaded from, so runs behave the same from any working directory.
pub fn resolve_paths(config: &mut KeeperConfig, base: &Path) {
    if config.data_dir.is_relative() {
        config.data_dir = base.join(&config.data_dir);
    }
    if config.contexts_dir.is_relative() {
        config.contexts_dir = base.join(&config.contexts_dir);
    }
    if let Some(target) = config.sync_target.take() {
        config.sync_target =
            Some(if target.is_relative() { base.join(target) } else { target });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_lookup_is_case_insensitive() {
        let mut cfg = KeeperConfig::default();
        cfg.domains.push(DomainConfig {
            name: "Astronomy".into(),
            description: String::new(),
            keywords: vec![],
            pinned: vec![],
        });
        assert!(cfg.domain("astronomy").is_some());
        assert!(cfg.domain("finance").is_none());
    }

    #[test]
    fn data_file_is_per_domain() {
        let cfg = KeeperConfig::default();
        assert_eq!(cfg.data_file("astronomy"), PathBuf::from("data/astronomy.json"));
    }

    #[test]
    fn resolve_paths_leaves_absolute_paths_alone() {
        let mut cfg = KeeperConfig::default();
        cfg.data_dir = PathBuf::from("/var/data");
        resolve_paths(&mut cfg, Path::new("/etc/keeper"));
        assert_eq!(cfg.data_dir, PathBuf::from("/var/data"));
        assert_eq!(cfg.contexts_dir, PathBuf::from("/etc/keeper/contexts"));
    }
}
