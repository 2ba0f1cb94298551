//! Synchronizing domain data and context files to the frontend data
//! directory. Local copy only; the target is whatever the web server serves.

use crate::domain::RunSummary;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Copy domain JSON files and context files into `target`.
///
/// Layout mirrors the source: `<target>/<domain>.json` and
/// `<target>/contexts/<file>`. Unchanged files (same size, not older) are
/// skipped; per-file failures are logged and counted, never fatal.
pub fn sync_to_target(data_dir: &Path, contexts_dir: &Path, target: &Path) -> Result<RunSummary> {
    fs::create_dir_all(target)
        .with_context(|| format!("Failed creating sync target: {}", target.display()))?;

    let mut summary = RunSummary::default();

    if data_dir.is_dir() {
        for entry in fs::read_dir(data_dir)
            .with_context(|| format!("Failed reading data dir: {}", data_dir.display()))?
        {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(file_name) = path.file_name() else { continue };
            copy_one(&path, &target.join(file_name), &mut summary);
        }
    }

    if contexts_dir.is_dir() {
        let contexts_target = target.join("contexts");
        fs::create_dir_all(&contexts_target).with_context(|| {
            format!("Failed creating contexts target: {}", contexts_target.display())
        })?;

        for entry in WalkDir::new(contexts_dir).min_depth(1).max_depth(1) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("skipping unreadable context entry: {e}");
                    summary.failed += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }
            copy_one(entry.path(), &contexts_target.join(entry.file_name()), &mut summary);
        }
    }

    Ok(summary)
}

fn copy_one(src: &Path, dest: &Path, summary: &mut RunSummary) {
    if !needs_copy(src, dest) {
        summary.skipped += 1;
        return;
    }
    match fs::copy(src, dest) {
        Ok(_) => {
            tracing::debug!("synced {} -> {}", src.display(), dest.display());
            summary.processed += 1;
        }
        Err(e) => {
            tracing::warn!("failed syncing {}: {e}", src.display());
            summary.failed += 1;
        }
    }
}

/// A file needs copying when the destination is missing, differs in size,
/// or is older than the source.
fn needs_copy(src: &Path, dest: &Path) -> bool {
    let Ok(dest_meta) = fs::metadata(dest) else {
        return true;
    };
    let Ok(src_meta) = fs::metadata(src) else {
        return true;
    };
    if src_meta.len() != dest_meta.len() {
        return true;
    }
    match (src_meta.modified(), dest_meta.modified()) {
        (Ok(src_time), Ok(dest_time)) => src_time > dest_time,
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, std::path::PathBuf, std::path::PathBuf, std::path::PathBuf) {
        let tmp = TempDir::new().expect("tmp");
        let data = tmp.path().join("data");
        let contexts = tmp.path().join("contexts");
        let target = tmp.path().join("site");
        fs::create_dir_all(&data).expect("data dir");
        fs::create_dir_all(&contexts).expect("contexts dir");
        (tmp, data, contexts, target)
    }

    #[test]
    fn copies_json_and_context_files() {
        let (_tmp, data, contexts, target) = setup();
        fs::write(data.join("astronomy.json"), "{}").expect("write");
        fs::write(data.join("notes.txt"), "ignored").expect("write");
        fs::write(contexts.join("astropy-context.txt"), "ctx").expect("write");

        let summary = sync_to_target(&data, &contexts, &target).expect("sync");
        assert_eq!(summary.processed, 2);
        assert_eq!(summary.failed, 0);
        assert!(target.join("astronomy.json").exists());
        assert!(target.join("contexts/astropy-context.txt").exists());
        assert!(!target.join("notes.txt").exists(), "non-JSON data files are not synced");
    }

    #[test]
    fn unchanged_files_are_skipped_on_second_run() {
        let (_tmp, data, contexts, target) = setup();
        fs::write(data.join("finance.json"), "{}").expect("write");

        let first = sync_to_target(&data, &contexts, &target).expect("sync");
        assert_eq!(first.processed, 1);

        let second = sync_to_target(&data, &contexts, &target).expect("sync");
        assert_eq!(second.processed, 0);
        assert_eq!(second.skipped, 1);
    }

    #[test]
    fn missing_source_dirs_yield_empty_summary() {
        let tmp = TempDir::new().expect("tmp");
        let summary = sync_to_target(
            &tmp.path().join("nope-data"),
            &tmp.path().join("nope-contexts"),
            &tmp.path().join("site"),
        )
        .expect("sync");
        assert_eq!(summary, RunSummary::default());
    }
}
