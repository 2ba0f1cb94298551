//! Context-file generation via an external documentation tool.
//!
//! The generator is injected as a trait so the pipeline stays testable
//! without cloning repositories or spawning subprocesses.

pub mod clone;

pub use clone::clone_repository;

use crate::config::DocgenSettings;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;

/// Produces the plain-text documentation bundle for one repository checkout.
pub trait DocGenerator {
    fn generate(&self, repo_path: &Path) -> Result<String>;
}

/// Obtains a local checkout for a repository URL.
pub trait RepoSource {
    fn checkout(&self, url: &str) -> Result<clone::ClonedRepo>;
}

/// The real source: a shallow git clone into a temp directory.
pub struct GitCloner;

impl RepoSource for GitCloner {
    fn checkout(&self, url: &str) -> Result<clone::ClonedRepo> {
        clone_repository(url)
    }
}

/// Runs the configured external command with the repository path as its
/// final argument and captures stdout as the context text.
pub struct CommandDocGenerator {
    program: String,
    args: Vec<String>,
}

impl CommandDocGenerator {
    pub fn new(settings: &DocgenSettings) -> Self {
        Self { program: settings.command.clone(), args: settings.args.clone() }
    }
}

impl DocGenerator for CommandDocGenerator {
    fn generate(&self, repo_path: &Path) -> Result<String> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(repo_path)
            .output()
            .with_context(|| format!("Failed running doc generator: {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!(
                "doc generator exited with {} for {}: {}",
                output.status,
                repo_path.display(),
                stderr.trim()
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Context file naming convention consumed by the frontend.
pub fn context_file_name(repo_name: &str) -> String {
    format!("{repo_name}-context.txt")
}
