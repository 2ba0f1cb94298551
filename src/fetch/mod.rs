//! Fetching repository candidates and star counts from the GitHub API.

pub mod github;

pub use github::GitHubClient;

use thiserror::Error;

/// Fetch failures are recovered per repository: a failed item is excluded
/// from the fresh list for this run and never aborts the batch.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("rate limited by the GitHub API")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("malformed API response: {0}")]
    Decode(#[from] serde_json::Error),
}
