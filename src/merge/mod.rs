//! Ranked-library-list merging.
//!
//! The one piece of business logic every maintenance step shares: combine a
//! previously persisted domain list with a freshly fetched candidate list,
//! preserving per-record metadata for survivors and assigning tie-sharing
//! ranks. Pure and deterministic: no I/O, and equal-star records keep their
//! pre-sort relative order so repeated runs against unchanged input produce
//! byte-identical output.

use crate::domain::{DomainLibraryList, FreshRepo, LibraryRecord, RunSummary};
use once_cell::sync::Lazy;
use regex::Regex;
use std::cmp::Reverse;
use std::collections::{BTreeSet, HashMap, HashSet};

/// `owner/repo`, possibly with further path segments; no whitespace.
static OWNER_REPO: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+(?:/[A-Za-z0-9_.\-]+)+$").expect("valid regex"));

/// Result of a merge: the new list plus everything the caller reports.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub list: DomainLibraryList,
    /// Human-readable skip reasons; a bad record never aborts the batch.
    pub warnings: Vec<String>,
    /// Fresh records with no existing match.
    pub added: usize,
    /// Fresh records that matched an existing record.
    pub updated: usize,
    /// Pinned records carried over without a fresh fetch.
    pub carried: usize,
    /// Fresh records skipped as malformed or duplicate.
    pub skipped: usize,
}

impl MergeOutcome {
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            processed: self.added + self.updated + self.carried,
            skipped: self.skipped,
            failed: 0,
        }
    }
}

/// Merge `fresh` into `existing`, retaining `pinned` names unconditionally.
///
/// Semantics:
/// - one output record per distinct fresh name (case-insensitive; first
///   occurrence wins, later duplicates are warned about and skipped);
/// - a fresh record matching an existing one keeps the existing record's
///   casing, context-file metadata, description, tags and opaque extra
///   fields, while `stars` and `github_url` come from the fresh data;
/// - an unmatched fresh record becomes a new one with no context file;
/// - a pinned name absent from `fresh` is carried over from `existing` with
///   its last-known stars, or materialized at zero stars if never seen;
/// - records existing only in the prior list and not pinned are dropped —
///   the fresh fetch is authoritative.
pub fn merge(
    existing: &DomainLibraryList,
    fresh: &[FreshRepo],
    pinned: &BTreeSet<String>,
) -> MergeOutcome {
    let existing_by_key: HashMap<String, &LibraryRecord> = existing
        .libraries
        .iter()
        .map(|r| (r.name.to_ascii_lowercase(), r))
        .collect();

    let mut seen: HashSet<String> = HashSet::with_capacity(fresh.len());
    let mut merged: Vec<LibraryRecord> = Vec::with_capacity(fresh.len() + pinned.len());
    let mut warnings = Vec::new();
    let (mut added, mut updated, mut carried, mut skipped) = (0, 0, 0, 0);

    for repo in fresh {
        let name = repo.name.trim();
        if !OWNER_REPO.is_match(name) {
            warnings.push(format!("skipping malformed repository name: {:?}", repo.name));
            skipped += 1;
            continue;
        }
        let key = name.to_ascii_lowercase();
        if !seen.insert(key.clone()) {
            warnings.push(format!("skipping duplicate repository name: {name}"));
            skipped += 1;
            continue;
        }

        let url = repo
            .github_url
            .clone()
            .unwrap_or_else(|| format!("https://github.com/{name}"));

        match existing_by_key.get(&key) {
            Some(prev) => {
                let mut rec = (*prev).clone();
                rec.stars = repo.stars;
                rec.github_url = url;
                merged.push(rec);
                updated += 1;
            }
            None => {
                let mut rec = LibraryRecord::new(name, url, repo.stars);
                rec.description = repo.description.clone();
                merged.push(rec);
                added += 1;
            }
        }
    }

    for name in pinned {
        let name = name.trim();
        if !OWNER_REPO.is_match(name) {
            warnings.push(format!("skipping malformed pinned name: {name:?}"));
            skipped += 1;
            continue;
        }
        let key = name.to_ascii_lowercase();
        if !seen.insert(key.clone()) {
            continue; // already present via fresh
        }
        match existing_by_key.get(&key) {
            Some(prev) => merged.push((*prev).clone()),
            None => merged.push(LibraryRecord::new(
                name,
                format!("https://github.com/{name}"),
                0,
            )),
        }
        carried += 1;
    }

    assign_ranks(&mut merged);

    MergeOutcome {
        list: DomainLibraryList {
            libraries: merged,
            domain: existing.domain.clone(),
            description: existing.description.clone(),
            keywords: existing.keywords.clone(),
        },
        warnings,
        added,
        updated,
        carried,
        skipped,
    }
}

/// Sort by stars descending (stable) and assign tie-sharing ranks: the first
/// record gets rank 1; a record tied with its predecessor shares its rank,
/// otherwise it gets its 1-based position.
pub fn assign_ranks(records: &mut [LibraryRecord]) {
    records.sort_by_key(|r| Reverse(r.stars));

    let mut prev_stars: Option<u64> = None;
    let mut prev_rank = 0u64;
    for (i, rec) in records.iter_mut().enumerate() {
        let rank = match prev_stars {
            Some(stars) if stars == rec.stars => prev_rank,
            _ => (i + 1) as u64,
        };
        rec.rank = rank;
        prev_rank = rank;
        prev_stars = Some(rec.stars);
    }
}
