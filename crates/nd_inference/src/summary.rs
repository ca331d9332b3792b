use std::sync::Arc;

use chrono::Utc;
use nd_core::{CacheEntry, NewsItem, Result, Summarizer};
use nd_storage::SummaryCache;
use tracing::{debug, info, warn};

use crate::render::markdown_to_html;

/// Topic summaries backed by the on-disk cache.
///
/// Entries are keyed by topic name only, so within the freshness window a
/// topic keeps its summary even if the headlines behind it have changed.
#[derive(Debug, Clone)]
pub struct SummaryService {
    model: Arc<dyn Summarizer>,
    cache: SummaryCache,
}

impl SummaryService {
    pub fn new(model: Arc<dyn Summarizer>, cache: SummaryCache) -> Self {
        Self { model, cache }
    }

    pub fn model(&self) -> &Arc<dyn Summarizer> {
        &self.model
    }

    pub async fn get_summary(
        &self,
        topic: &str,
        items: &[NewsItem],
        force_refresh: bool,
    ) -> Result<String> {
        self.get_summary_at(topic, items, force_refresh, now_secs()).await
    }

    /// Serves a fresh cached summary unless `force_refresh` is set, otherwise
    /// asks the model and caches the rendered answer. A failed model call
    /// yields a fallback sentence and leaves the cache alone. Errors only
    /// come from reading or writing the cache file.
    pub async fn get_summary_at(
        &self,
        topic: &str,
        items: &[NewsItem],
        force_refresh: bool,
        now: f64,
    ) -> Result<String> {
        if !force_refresh {
            if let Some(entry) = self.cache.fresh(topic, now)? {
                debug!("Serving cached summary for '{}'", topic);
                return Ok(entry.summary);
            }
        }

        let prompt = build_prompt(topic, items);
        match self.model.complete(&prompt).await {
            Ok(text) => {
                let summary = markdown_to_html(&text);
                self.cache.put(
                    topic,
                    CacheEntry {
                        summary: summary.clone(),
                        timestamp: now,
                    },
                )?;
                info!(
                    "Summarized {} headlines for '{}' with {}",
                    items.len(),
                    topic,
                    self.model.name()
                );
                Ok(summary)
            }
            Err(e) => {
                warn!("Summary for '{}' failed: {}", topic, e);
                Ok(fallback_summary(&e))
            }
        }
    }
}

pub fn build_prompt(topic: &str, items: &[NewsItem]) -> String {
    let headlines = items
        .iter()
        .map(|item| format!("- {}", item.title))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "Hier sind die aktuellen Schlagzeilen zum Thema '{}':\n{}\n\n\
         Bitte schreibe eine kurze, prägnante Zusammenfassung (max. 3 Sätze) über die aktuelle Lage \
         in diesem Themenbereich auf Deutsch. Sei informativ und direkt.",
        topic, headlines
    )
}

pub fn fallback_summary(error: &dyn std::fmt::Display) -> String {
    format!("KI-Zusammenfassung konnte nicht geladen werden. ({})", error)
}

fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
