use std::collections::BTreeMap;
use std::path::PathBuf;

use nd_core::{CacheEntry, Result};
use tracing::debug;

use crate::JsonDocument;

/// Twelve hours.
pub const FRESHNESS_WINDOW_SECS: f64 = 43_200.0;

pub type CacheDocument = BTreeMap<String, CacheEntry>;

/// Summaries keyed by topic name. Entries are overwritten, never evicted.
#[derive(Debug, Clone)]
pub struct SummaryCache {
    doc: JsonDocument<CacheDocument>,
}

impl SummaryCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { doc: JsonDocument::new(path) }
    }

    pub fn load(&self) -> Result<CacheDocument> {
        self.doc.load()
    }

    pub fn save(&self, cache: &CacheDocument) -> Result<()> {
        self.doc.save(cache)
    }

    /// The stored summary for `topic` if it was written less than
    /// [`FRESHNESS_WINDOW_SECS`] before `now`.
    pub fn fresh(&self, topic: &str, now: f64) -> Result<Option<CacheEntry>> {
        let cache = self.load()?;
        Ok(cache.get(topic).filter(|entry| is_fresh(entry, now)).cloned())
    }

    pub fn put(&self, topic: &str, entry: CacheEntry) -> Result<()> {
        let mut cache = self.load()?;
        cache.insert(topic.to_string(), entry);
        self.save(&cache)?;
        debug!("Cached summary for '{}'", topic);
        Ok(())
    }
}

pub fn is_fresh(entry: &CacheEntry, now: f64) -> bool {
    now - entry.timestamp < FRESHNESS_WINDOW_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: f64 = 1_717_243_200.0;

    fn entry(summary: &str, timestamp: f64) -> CacheEntry {
        CacheEntry { summary: summary.to_string(), timestamp }
    }

    #[test]
    fn test_freshness_boundary() {
        assert!(is_fresh(&entry("x", NOW - 100.0), NOW));
        assert!(is_fresh(&entry("x", NOW - 43_199.5), NOW));
        assert!(!is_fresh(&entry("x", NOW - 43_200.0), NOW));
        assert!(!is_fresh(&entry("x", NOW - 43_201.0), NOW));
    }

    #[test]
    fn test_fresh_lookup() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SummaryCache::new(dir.path().join("cache.json"));

        cache.put("Neu", entry("<p>neu</p>", NOW - 10.0)).unwrap();
        cache.put("Alt", entry("<p>alt</p>", NOW - 50_000.0)).unwrap();

        assert_eq!(cache.fresh("Neu", NOW).unwrap().unwrap().summary, "<p>neu</p>");
        assert!(cache.fresh("Alt", NOW).unwrap().is_none());
        assert!(cache.fresh("Fehlt", NOW).unwrap().is_none());
    }

    #[test]
    fn test_put_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SummaryCache::new(dir.path().join("cache.json"));

        cache.put("T", entry("first", NOW - 5.0)).unwrap();
        cache.put("T", entry("second", NOW)).unwrap();

        let doc = cache.load().unwrap();
        assert_eq!(doc.len(), 1);
        assert_eq!(doc["T"], entry("second", NOW));
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = SummaryCache::new(dir.path().join("cache.json"));

        let mut doc = CacheDocument::new();
        doc.insert("Klima".into(), entry("<p>Hitze</p>\n", 1_700_000_000.25));
        doc.insert("Sport".into(), entry("<ul>\n<li>Tor</li>\n</ul>\n", 1_700_000_100.0));
        cache.save(&doc).unwrap();

        assert_eq!(cache.load().unwrap(), doc);
    }
}
