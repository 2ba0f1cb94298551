//! Core data model: library records, per-domain ranked lists, run summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One ranked repository inside a domain's library list.
///
/// Field names follow the persisted JSON consumed by the web frontend, which
/// mixes snake_case and camelCase; unknown fields round-trip through `extra`
/// so older writers' data is never lost on refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryRecord {
    /// Canonical `owner/repo` identifier; casing preserved, matched
    /// case-insensitively.
    pub name: String,
    pub github_url: String,
    pub stars: u64,
    pub rank: u64,
    #[serde(rename = "hasContextFile", default)]
    pub has_context_file: bool,
    #[serde(rename = "contextFileName", default, skip_serializing_if = "Option::is_none")]
    pub context_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LibraryRecord {
    /// A brand-new record: no context file, no preserved metadata.
    pub fn new(name: impl Into<String>, github_url: impl Into<String>, stars: u64) -> Self {
        Self {
            name: name.into(),
            github_url: github_url.into(),
            stars,
            rank: 0,
            has_context_file: false,
            context_file_name: None,
            description: None,
            last_updated: None,
            tags: None,
            extra: serde_json::Map::new(),
        }
    }

    /// The `repo` half of `owner/repo`, used to derive context file names.
    pub fn repo_name(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or(&self.name)
    }
}

/// A domain's full ranked list, as persisted to one JSON file per domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainLibraryList {
    pub libraries: Vec<LibraryRecord>,
    pub domain: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl DomainLibraryList {
    pub fn empty(
        domain: impl Into<String>,
        description: impl Into<String>,
        keywords: Vec<String>,
    ) -> Self {
        Self { libraries: Vec::new(), domain: domain.into(), description: description.into(), keywords }
    }

    /// Case-insensitive lookup by `owner/repo` name.
    pub fn find(&self, name: &str) -> Option<&LibraryRecord> {
        self.libraries.iter().find(|r| r.name.eq_ignore_ascii_case(name))
    }
}

/// A freshly fetched repository candidate, before merging.
#[derive(Debug, Clone, PartialEq)]
pub struct FreshRepo {
    pub name: String,
    /// Reconstructed as `https://github.com/<name>` when absent.
    pub github_url: Option<String>,
    pub stars: u64,
    /// Used only for brand-new records; existing descriptions win.
    pub description: Option<String>,
}

impl FreshRepo {
    pub fn new(name: impl Into<String>, stars: u64) -> Self {
        Self { name: name.into(), github_url: None, stars, description: None }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.github_url = Some(url.into());
        self
    }
}

/// Per-step item counts, printed after every run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn absorb(&mut self, other: RunSummary) {
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} processed, {} skipped, {} failed",
            self.processed, self.skipped, self.failed
        )
    }
}
