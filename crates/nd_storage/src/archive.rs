use std::collections::{BTreeMap, HashSet};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use nd_core::{ArchiveItem, Result};
use tracing::{debug, info};

use crate::JsonDocument;

/// Badge classes handed out to topics on the archive page.
pub const TOPIC_COLORS: [&str; 6] = [
    "bg-primary",
    "bg-success",
    "bg-danger",
    "bg-warning text-dark",
    "bg-info text-dark",
    "bg-secondary",
];

/// Display name for archived items saved without a topic.
pub const UNKNOWN_TOPIC: &str = "Unbekannt";

#[derive(Debug, Clone)]
pub struct ArchiveStore {
    doc: JsonDocument<Vec<ArchiveItem>>,
}

impl ArchiveStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { doc: JsonDocument::new(path) }
    }

    /// Items in insertion order.
    pub fn load(&self) -> Result<Vec<ArchiveItem>> {
        self.doc.load()
    }

    pub fn save(&self, items: &Vec<ArchiveItem>) -> Result<()> {
        self.doc.save(items)
    }

    /// Appends `item` unless its link is already archived.
    /// Returns whether anything was written.
    pub fn add(&self, item: ArchiveItem) -> Result<bool> {
        let mut items = self.load()?;
        if items.iter().any(|a| a.link == item.link) {
            debug!("Already archived: {}", item.link);
            return Ok(false);
        }
        info!("Archiving {}", item.link);
        items.push(item);
        self.save(&items)?;
        Ok(true)
    }

    /// Drops every item with this link. Unknown links are not an error.
    pub fn remove(&self, link: &str) -> Result<()> {
        let items = self.load()?;
        let before = items.len();
        let remaining: Vec<ArchiveItem> = items.into_iter().filter(|a| a.link != link).collect();
        debug!("Removed {} archive item(s) for {}", before - remaining.len(), link);
        self.save(&remaining)
    }

    pub fn list_sorted(&self) -> Result<Vec<ArchiveItem>> {
        let mut items = self.load()?;
        sort_archive(&mut items);
        Ok(items)
    }

    pub fn links(&self) -> Result<HashSet<String>> {
        Ok(self.load()?.into_iter().map(|a| a.link).collect())
    }
}

/// Groups items by topic (A-Z, case-insensitive, untopiced last) with the
/// newest article first inside each group.
pub fn sort_archive(items: &mut [ArchiveItem]) {
    // Both passes are stable, so the date order survives the topic pass.
    items.sort_by(|a, b| parse_published(&b.published).cmp(&parse_published(&a.published)));
    items.sort_by_cached_key(|item| match &item.topic {
        Some(topic) => (false, topic.to_lowercase()),
        None => (true, String::new()),
    });
}

/// `None` for anything that is not an RFC 2822 date; it orders before every real date.
/// A trailing `UTC` zone is accepted as `+0000`.
pub fn parse_published(published: &str) -> Option<DateTime<Utc>> {
    let published = published.trim();
    let normalized = match published.strip_suffix(" UTC") {
        Some(rest) => format!("{} +0000", rest),
        None => published.to_string(),
    };
    DateTime::parse_from_rfc2822(&normalized)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn topic_color(topic: &str) -> &'static str {
    let sum: u64 = topic.chars().map(|c| c as u64).sum();
    TOPIC_COLORS[(sum % TOPIC_COLORS.len() as u64) as usize]
}

pub fn display_topic(item: &ArchiveItem) -> &str {
    item.topic.as_deref().unwrap_or(UNKNOWN_TOPIC)
}

/// Color for every topic present in `items`.
pub fn topic_colors(items: &[ArchiveItem]) -> BTreeMap<String, &'static str> {
    let mut colors = BTreeMap::new();
    for item in items {
        let topic = display_topic(item);
        if !colors.contains_key(topic) {
            colors.insert(topic.to_string(), topic_color(topic));
        }
    }
    colors
}
