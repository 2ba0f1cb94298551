//! Domain list persistence: one JSON file per domain, replaced in full.

use crate::domain::DomainLibraryList;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load a domain's persisted list, or an empty list seeded from the given
/// domain metadata when the file does not exist yet.
pub fn load_or_init(
    path: &Path,
    domain: &str,
    description: &str,
    keywords: &[String],
) -> Result<DomainLibraryList> {
    if !path.exists() {
        return Ok(DomainLibraryList::empty(domain, description, keywords.to_vec()));
    }
    load(path)
}

pub fn load(path: &Path) -> Result<DomainLibraryList> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed reading domain file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Invalid domain JSON: {}", path.display()))
}

/// Replace the persisted file in full. Failure here is fatal for this
/// domain's run; other domains are unaffected.
pub fn save(path: &Path, list: &DomainLibraryList) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed creating data directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(list)?;
    fs::write(path, json)
        .with_context(|| format!("Failed writing domain file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LibraryRecord;
    use tempfile::TempDir;

    #[test]
    fn load_or_init_seeds_empty_list_when_missing() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("astronomy.json");
        let list = load_or_init(&path, "astronomy", "desc", &["astro".to_string()])
            .expect("init");
        assert!(list.libraries.is_empty());
        assert_eq!(list.domain, "astronomy");
        assert_eq!(list.keywords, vec!["astro"]);
        assert!(!path.exists(), "init does not touch disk");
    }

    #[test]
    fn save_then_load_roundtrips() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("data").join("finance.json");

        let mut list = DomainLibraryList::empty("finance", "Money things", vec!["quant".into()]);
        let mut rec = LibraryRecord::new("q/lib", "https://github.com/q/lib", 42);
        rec.rank = 1;
        rec.has_context_file = true;
        rec.context_file_name = Some("lib-context.txt".into());
        list.libraries.push(rec);

        save(&path, &list).expect("save");
        let loaded = load(&path).expect("load");
        assert_eq!(loaded, list);
    }

    #[test]
    fn load_rejects_invalid_json() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("bad.json");
        std::fs::write(&path, "{not json").expect("write");
        assert!(load(&path).is_err());
    }

    #[test]
    fn save_preserves_unknown_record_fields() {
        let tmp = TempDir::new().expect("tmp");
        let path = tmp.path().join("d.json");
        std::fs::write(
            &path,
            r#"{"libraries":[{"name":"a/b","github_url":"u","stars":1,"rank":1,"docsUrl":"https://docs"}],"domain":"d","description":"","keywords":[]}"#,
        )
        .expect("write");

        let list = load(&path).expect("load");
        save(&path, &list).expect("save");

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).expect("read")).expect("json");
        assert_eq!(raw["libraries"][0]["docsUrl"], serde_json::json!("https://docs"));
    }
}
