//! Repository cloning for context generation.

use anyhow::{Context, Result};
use git2::{FetchOptions, Repository};
use std::env;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// A cloned checkout in a unique temp directory, removed on drop.
pub struct ClonedRepo {
    path: PathBuf,
}

impl ClonedRepo {
    /// Take ownership of an existing directory; it is removed on drop.
    pub fn adopt(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ClonedRepo {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_dir_all(&self.path) {
            tracing::debug!("failed removing clone dir {}: {e}", self.path.display());
        }
    }
}

/// Clone the default branch of `url` into a unique temp directory.
///
/// Tries a shallow clone (depth=1) first; some servers reject shallow
/// fetches, so a full clone is the fallback.
pub fn clone_repository(url: &str) -> Result<ClonedRepo> {
    let temp_dir = build_temp_repo_dir();
    std::fs::create_dir_all(&temp_dir)
        .with_context(|| format!("Failed creating temp directory: {}", temp_dir.display()))?;

    let normalized = normalize_github_url(url);
    let url = normalized.as_str();

    let repo = shallow_clone(url, &temp_dir).or_else(|_| {
        Repository::clone(url, &temp_dir)
            .with_context(|| format!("Failed cloning repository from {url}"))
    })?;
    drop(repo);

    Ok(ClonedRepo { path: temp_dir })
}

/// Normalize a GitHub URL to the canonical HTTPS `.git` form:
/// trailing slashes stripped, `.git` appended when missing,
/// non-GitHub URLs left unchanged.
fn normalize_github_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    if trimmed.contains("github.com") && !trimmed.ends_with(".git") {
        format!("{trimmed}.git")
    } else {
        trimmed.to_string()
    }
}

fn shallow_clone(url: &str, dest: &Path) -> Result<Repository> {
    let mut fo = FetchOptions::new();
    fo.depth(1);

    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fo);

    builder.clone(url, dest).with_context(|| format!("Shallow clone from {url} failed"))
}

fn build_temp_repo_dir() -> PathBuf {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_nanos()).unwrap_or(0);
    let pid = std::process::id();
    env::temp_dir().join(format!("context-keeper-{pid}-{nanos}"))
}
