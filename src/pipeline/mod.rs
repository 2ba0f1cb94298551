//! Maintenance pipeline steps: update, re-rank, context generation, and the
//! full multi-step run. Per-item errors skip and continue; a failed domain
//! never blocks the others.

use crate::config::{DomainConfig, KeeperConfig};
use crate::docgen::{context_file_name, DocGenerator, RepoSource};
use crate::domain::RunSummary;
use crate::fetch::GitHubClient;
use crate::merge::merge;
use crate::store;
use anyhow::{Context, Result};
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::fs;

/// Fetch fresh candidates for one domain, merge into the persisted list,
/// and replace the file in full.
pub fn update_domain(
    config: &KeeperConfig,
    domain: &DomainConfig,
    client: &GitHubClient,
) -> Result<RunSummary> {
    let data_file = config.data_file(&domain.name);
    let existing =
        store::load_or_init(&data_file, &domain.name, &domain.description, &domain.keywords)?;

    let mut fresh = client
        .search_domain(&domain.keywords, config.fetch.limit, config.fetch.min_stars)
        .with_context(|| format!("Search failed for domain {}", domain.name))?;
    tracing::info!("{}: search returned {} candidates", domain.name, fresh.len());

    // Pinned repos the search missed get an individual star refresh; ones
    // that fail to fetch are carried over by the merge with last-known stars.
    let pinned = domain.pinned_set();
    let found: HashSet<String> = fresh.iter().map(|r| r.name.to_ascii_lowercase()).collect();
    let missing_pinned: Vec<String> =
        pinned.iter().filter(|name| !found.contains(&name.to_ascii_lowercase())).cloned().collect();
    let (pinned_fresh, refresh_failed) =
        client.refresh_stars(&missing_pinned, config.fetch.workers);
    fresh.extend(pinned_fresh);

    let outcome = merge(&existing, &fresh, &pinned);
    for warning in &outcome.warnings {
        tracing::warn!("{}: {}", domain.name, warning);
    }

    store::save(&data_file, &outcome.list)?;

    let mut summary = outcome.summary();
    summary.failed += refresh_failed.len();
    Ok(summary)
}

/// Recompute ranks and deduplicate from persisted data alone, without
/// touching the network. Useful after hand-edits to a domain file.
pub fn rank_domain(config: &KeeperConfig, domain: &DomainConfig) -> Result<RunSummary> {
    let data_file = config.data_file(&domain.name);
    let existing = store::load(&data_file)
        .with_context(|| format!("No persisted list for domain {}", domain.name))?;

    let fresh: Vec<_> = existing
        .libraries
        .iter()
        .map(|r| {
            crate::domain::FreshRepo::new(r.name.clone(), r.stars).with_url(r.github_url.clone())
        })
        .collect();

    let outcome = merge(&existing, &fresh, &domain.pinned_set());
    for warning in &outcome.warnings {
        tracing::warn!("{}: {}", domain.name, warning);
    }

    store::save(&data_file, &outcome.list)?;
    Ok(outcome.summary())
}

/// Clone up to `limit` repositories that lack a context file (all of the top
/// `limit` when `force`), run the doc generator against each checkout, and
/// record the generated file on the library record. Per-repo failures are
/// logged and skipped; the updated list is saved even after partial runs.
pub fn generate_contexts(
    config: &KeeperConfig,
    domain: &DomainConfig,
    source: &dyn RepoSource,
    generator: &dyn DocGenerator,
    limit: usize,
    force: bool,
) -> Result<RunSummary> {
    let data_file = config.data_file(&domain.name);
    let mut list = store::load(&data_file)
        .with_context(|| format!("No persisted list for domain {}", domain.name))?;

    fs::create_dir_all(&config.contexts_dir).with_context(|| {
        format!("Failed creating contexts directory: {}", config.contexts_dir.display())
    })?;

    // The list is already in rank order; take the top candidates.
    let candidates: Vec<usize> = list
        .libraries
        .iter()
        .enumerate()
        .filter(|(_, r)| force || !r.has_context_file)
        .map(|(i, _)| i)
        .take(limit)
        .collect();

    let bar = ProgressBar::new(candidates.len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{prefix} [{bar:30}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar.set_prefix(domain.name.clone());

    let mut summary = RunSummary::default();
    for index in candidates {
        let (name, url, repo_name) = {
            let record = &list.libraries[index];
            (record.name.clone(), record.github_url.clone(), record.repo_name().to_string())
        };
        bar.set_message(name.clone());

        match generate_one(source, generator, config, &url, &repo_name) {
            Ok(file_name) => {
                let record = &mut list.libraries[index];
                record.has_context_file = true;
                record.context_file_name = Some(file_name);
                record.last_updated =
                    Some(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string());
                summary.processed += 1;
            }
            Err(e) => {
                tracing::warn!("context generation failed for {name}: {e:#}");
                summary.failed += 1;
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    store::save(&data_file, &list)?;
    Ok(summary)
}

fn generate_one(
    source: &dyn RepoSource,
    generator: &dyn DocGenerator,
    config: &KeeperConfig,
    url: &str,
    repo_name: &str,
) -> Result<String> {
    let checkout = source.checkout(url)?;
    let text = generator.generate(checkout.path())?;

    let file_name = context_file_name(repo_name);
    let out_path = config.contexts_dir.join(&file_name);
    fs::write(&out_path, text)
        .with_context(|| format!("Failed writing context file: {}", out_path.display()))?;
    Ok(file_name)
}

/// Outcome of a full maintenance run across domains.
#[derive(Debug, Default)]
pub struct MaintenanceReport {
    pub domains_ok: usize,
    pub domains_failed: usize,
    pub update: RunSummary,
    pub generate: RunSummary,
    pub sync: RunSummary,
}

pub struct MaintenanceOptions {
    pub generate_limit: usize,
    pub skip_generate: bool,
}

/// The full pipeline: update and generate per domain (continuing past
/// failed domains), then one sync pass when a target is configured.
pub fn run_maintenance(
    config: &KeeperConfig,
    domains: &[&DomainConfig],
    client: &GitHubClient,
    source: &dyn RepoSource,
    generator: &dyn DocGenerator,
    options: &MaintenanceOptions,
) -> Result<MaintenanceReport> {
    let mut report = MaintenanceReport::default();

    for domain in domains {
        match maintain_domain(config, domain, client, source, generator, options, &mut report) {
            Ok(()) => report.domains_ok += 1,
            Err(e) => {
                tracing::error!("domain {} failed: {e:#}", domain.name);
                report.domains_failed += 1;
            }
        }
    }

    if let Some(target) = &config.sync_target {
        report.sync = crate::sync::sync_to_target(&config.data_dir, &config.contexts_dir, target)?;
    }

    Ok(report)
}

fn maintain_domain(
    config: &KeeperConfig,
    domain: &DomainConfig,
    client: &GitHubClient,
    source: &dyn RepoSource,
    generator: &dyn DocGenerator,
    options: &MaintenanceOptions,
    report: &mut MaintenanceReport,
) -> Result<()> {
    let update = update_domain(config, domain, client)?;
    tracing::info!("{}: update done ({update})", domain.name);
    report.update.absorb(update);

    if !options.skip_generate {
        let generate = generate_contexts(
            config,
            domain,
            source,
            generator,
            options.generate_limit,
            false,
        )?;
        tracing::info!("{}: generate done ({generate})", domain.name);
        report.generate.absorb(generate);
    }

    Ok(())
}
