use async_trait::async_trait;
use nd_core::{Error, FeedRequest, NewsItem, NewsSource, Result};
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::parser::parse_items;

pub const GOOGLE_NEWS_SEARCH: &str = "https://news.google.com/rss/search";

/// Headline search through the public Google News RSS endpoint.
#[derive(Debug, Clone)]
pub struct GoogleNewsSource {
    client: Client,
    base_url: String,
}

impl GoogleNewsSource {
    pub fn new() -> Self {
        Self::with_base_url(GOOGLE_NEWS_SEARCH)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// `q` carries the search terms plus a `when:` recency token, and the
    /// locale is pinned through `hl`, `gl` and `ceid`.
    pub fn search_url(&self, request: &FeedRequest) -> Result<Url> {
        let query = format!("{} when:{}", request.query, request.period);
        let ceid = format!("{}:{}", request.region, request.language);
        Url::parse_with_params(
            &self.base_url,
            &[
                ("q", query.as_str()),
                ("hl", request.language.as_str()),
                ("gl", request.region.as_str()),
                ("ceid", ceid.as_str()),
            ],
        )
        .map_err(|e| Error::Feed(format!("Invalid feed URL: {}", e)))
    }
}

impl Default for GoogleNewsSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NewsSource for GoogleNewsSource {
    fn name(&self) -> &str {
        "Google News"
    }

    async fn fetch(&self, request: &FeedRequest) -> Result<Vec<NewsItem>> {
        let url = self.search_url(request)?;
        debug!("Fetching feed: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Feed(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let content = response.bytes().await?;
        let items = parse_items(&content, request.count)?;
        info!("Fetched {} headlines for '{}'", items.len(), request.query);
        Ok(items)
    }
}
