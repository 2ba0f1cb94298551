//! Config file loading

use crate::config::{resolve_paths, KeeperConfig};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Load configuration from `config_path`, or auto-discover one under `root`.
///
/// An explicitly provided file that fails to parse is an error; a broken
/// auto-discovered file only warns and falls back to defaults, so a stray
/// config never blocks a maintenance run the operator did not point at it.
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<KeeperConfig> {
    let config_path_provided = config_path.is_some();

    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(root),
    };

    let Some(config_file) = discovered else {
        return Ok(KeeperConfig::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    let ext = config_file.extension().and_then(|e| e.to_str()).unwrap_or("").to_ascii_lowercase();

    let parsed = match ext.as_str() {
        "toml" => parse_toml_config(&content, &config_file),
        "yaml" | "yml" => parse_yaml_config(&content, &config_file),
        other => Err(anyhow::anyhow!(
            "Unsupported config extension '.{}' for file {}",
            other,
            config_file.display()
        )),
    };

    let mut config = match parsed {
        Ok(cfg) => cfg,
        Err(e) => {
            if config_path_provided {
                return Err(e);
            }
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {}",
                config_file.display(),
                e
            );
            return Ok(KeeperConfig::default());
        }
    };

    let base = config_file.parent().unwrap_or(root);
    resolve_paths(&mut config, base);
    Ok(config)
}

/// Parse TOML config, supporting a nested [context-keeper] or [keeper] section.
fn parse_toml_config(content: &str, config_file: &Path) -> Result<KeeperConfig> {
    let raw: toml::Value = toml::from_str(content)
        .with_context(|| format!("Invalid TOML syntax: {}", config_file.display()))?;

    let config_val = if let Some(nested) = raw.get("context-keeper") {
        nested.clone()
    } else if let Some(nested) = raw.get("keeper") {
        nested.clone()
    } else {
        raw
    };

    config_val
        .try_into()
        .with_context(|| format!("Invalid TOML config: {}", config_file.display()))
}

/// Parse YAML config, supporting a nested context-keeper or keeper section.
fn parse_yaml_config(content: &str, config_file: &Path) -> Result<KeeperConfig> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)
        .with_context(|| format!("Invalid YAML syntax: {}", config_file.display()))?;

    let config_val = if let Some(nested) = raw.get("context-keeper") {
        nested.clone()
    } else if let Some(nested) = raw.get("keeper") {
        nested.clone()
    } else {
        raw
    };

    serde_yaml::from_value(config_val)
        .with_context(|| format!("Invalid YAML config: {}", config_file.display()))
}

fn discover_config(root: &Path) -> Option<PathBuf> {
    let candidates = [
        "context-keeper.toml",
        ".context-keeper.toml",
        "keeper.toml",
        ".keeper.toml",
        "keeper.yml",
        ".keeper.yml",
        "keeper.yaml",
        ".keeper.yaml",
    ];

    for candidate in candidates {
        let path = root.join(candidate);
        if path.exists() {
            return Some(path);
        }
    }

    None
}
