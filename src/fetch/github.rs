//! GitHub REST API client: repository search and star refresh.

use crate::config::FetchSettings;
use crate::domain::FreshRepo;
use crate::fetch::FetchError;
use anyhow::{Context, Result};
use rayon::prelude::*;
use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::env;
use std::thread;
use std::time::Duration;

const API_BASE: &str = "https://api.github.com";
const PAGE_SIZE: usize = 100;

pub struct GitHubClient {
    http: Client,
    delay: Duration,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    full_name: String,
    html_url: String,
    stargazers_count: u64,
    #[serde(default)]
    description: Option<String>,
}

impl GitHubClient {
    pub fn new(settings: &FetchSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        if let Ok(token) = env::var(&settings.token_env) {
            if !token.is_empty() {
                let value = HeaderValue::from_str(&format!("Bearer {token}"))
                    .context("Invalid characters in API token")?;
                headers.insert(AUTHORIZATION, value);
            }
        }

        let http = Client::builder()
            .user_agent(concat!("context-keeper/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .context("Failed building HTTP client")?;

        Ok(Self { http, delay: Duration::from_millis(settings.delay_ms) })
    }

    /// Search repositories matching a domain's keywords, star-sorted,
    /// paging until `limit` candidates are collected or results run out.
    pub fn search_domain(
        &self,
        keywords: &[String],
        limit: usize,
        min_stars: u64,
    ) -> Result<Vec<FreshRepo>, FetchError> {
        let query = build_search_query(keywords, min_stars);
        let mut out: Vec<FreshRepo> = Vec::new();
        let mut page = 1u32;

        while out.len() < limit {
            let per_page = (limit - out.len()).min(PAGE_SIZE);
            thread::sleep(self.delay);

            let url = format!("{API_BASE}/search/repositories");
            let response = self
                .http
                .get(&url)
                .query(&[
                    ("q", query.as_str()),
                    ("sort", "stars"),
                    ("order", "desc"),
                    ("per_page", &per_page.to_string()),
                    ("page", &page.to_string()),
                ])
                .send()?;
            let body = check_status(response)?.text()?;

            let batch = parse_search_body(&body)?;
            let batch_len = batch.len();
            out.extend(batch);

            if batch_len < per_page {
                break; // last page
            }
            page += 1;
        }

        out.truncate(limit);
        Ok(out)
    }

    /// Current metadata for a single `owner/repo`.
    pub fn fetch_repo(&self, name: &str) -> Result<FreshRepo, FetchError> {
        thread::sleep(self.delay);
        let url = format!("{API_BASE}/repos/{name}");
        let response = self.http.get(&url).send()?;
        let body = check_status(response)?.text()?;
        let item: SearchItem = serde_json::from_str(&body)?;
        Ok(fresh_from_item(item))
    }

    /// Re-fetch star counts for known repositories with a bounded worker
    /// pool. Completion order never matters: results come back in input
    /// order, failures are logged and reported separately.
    pub fn refresh_stars(
        &self,
        names: &[String],
        workers: usize,
    ) -> (Vec<FreshRepo>, Vec<String>) {
        let pool = match rayon::ThreadPoolBuilder::new().num_threads(workers.max(1)).build() {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!("falling back to serial star refresh: {e}");
                let mut fresh = Vec::new();
                let mut failed = Vec::new();
                for name in names {
                    match self.fetch_repo(name) {
                        Ok(repo) => fresh.push(repo),
                        Err(e) => {
                            tracing::warn!("star refresh failed for {name}: {e}");
                            failed.push(name.clone());
                        }
                    }
                }
                return (fresh, failed);
            }
        };

        let results: Vec<(String, Result<FreshRepo, FetchError>)> = pool.install(|| {
            names
                .par_iter()
                .map(|name| (name.clone(), self.fetch_repo(name)))
                .collect()
        });

        let mut fresh = Vec::with_capacity(results.len());
        let mut failed = Vec::new();
        for (name, result) in results {
            match result {
                Ok(repo) => fresh.push(repo),
                Err(e) => {
                    tracing::warn!("star refresh failed for {name}: {e}");
                    failed.push(name);
                }
            }
        }
        (fresh, failed)
    }
}

/// GitHub search syntax: keywords OR-joined, optional star cutoff qualifier.
fn build_search_query(keywords: &[String], min_stars: u64) -> String {
    let mut query = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .collect::<Vec<_>>()
        .join(" OR ");
    if min_stars > 0 {
        if !query.is_empty() {
            query.push(' ');
        }
        query.push_str(&format!("stars:>={min_stars}"));
    }
    query
}

fn parse_search_body(body: &str) -> Result<Vec<FreshRepo>, FetchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response.items.into_iter().map(fresh_from_item).collect())
}

fn fresh_from_item(item: SearchItem) -> FreshRepo {
    FreshRepo {
        name: item.full_name,
        github_url: Some(item.html_url),
        stars: item.stargazers_count,
        description: item.description,
    }
}

fn check_status(response: Response) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // Both 403 and 429 signal rate limiting when the remaining quota is 0.
    let exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "0")
        .unwrap_or(false);
    if status.as_u16() == 429 || (status.as_u16() == 403 && exhausted) {
        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        return Err(FetchError::RateLimited { retry_after_secs });
    }

    Err(FetchError::Status { status: status.as_u16(), url: response.url().to_string() })
}
