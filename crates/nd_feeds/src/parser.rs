use nd_core::{Error, NewsItem, Result};
use rss::Channel;
use tracing::debug;

/// Source name used when an item carries no `<source>` element.
pub const FALLBACK_SOURCE: &str = "News";

/// Reads an RSS document and returns its first `count` items in feed order.
/// `published` is kept as the raw `pubDate` text.
pub fn parse_items(content: &[u8], count: usize) -> Result<Vec<NewsItem>> {
    let channel = Channel::read_from(content)
        .map_err(|e| Error::Feed(format!("Failed to parse feed: {}", e)))?;

    let items: Vec<NewsItem> = channel
        .items()
        .iter()
        .take(count)
        .filter_map(|item| {
            let Some(link) = item.link() else {
                debug!("Skipping item without link: {:?}", item.title());
                return None;
            };
            let source = item
                .source()
                .and_then(|s| s.title())
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(FALLBACK_SOURCE);

            Some(NewsItem {
                title: item.title().unwrap_or_default().to_string(),
                link: link.to_string(),
                published: item.pub_date().unwrap_or_default().to_string(),
                source: source.to_string(),
            })
        })
        .collect();

    debug!("Parsed {} of {} feed items", items.len(), channel.items().len());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"Klima" - Google News</title>
    <link>https://news.google.com</link>
    <description>Google News</description>
    <item>
      <title>Hitzewelle in Europa - tagesschau.de</title>
      <link>https://news.google.com/articles/1</link>
      <pubDate>Mon, 03 Jun 2024 07:00:00 GMT</pubDate>
      <source url="https://www.tagesschau.de">tagesschau.de</source>
    </item>
    <item>
      <title>Neue Klimaziele beschlossen</title>
      <link>https://news.google.com/articles/2</link>
      <pubDate>Sun, 02 Jun 2024 18:30:00 GMT</pubDate>
    </item>
    <item>
      <title>Dritter Artikel</title>
      <link>https://news.google.com/articles/3</link>
      <pubDate>Sat, 01 Jun 2024 09:15:00 GMT</pubDate>
      <source url="https://www.spiegel.de">DER SPIEGEL</source>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_extracts_fields() {
        let items = parse_items(FEED.as_bytes(), 10).unwrap();
        assert_eq!(items.len(), 3);

        assert_eq!(items[0].title, "Hitzewelle in Europa - tagesschau.de");
        assert_eq!(items[0].link, "https://news.google.com/articles/1");
        assert_eq!(items[0].published, "Mon, 03 Jun 2024 07:00:00 GMT");
        assert_eq!(items[0].source, "tagesschau.de");
        assert_eq!(items[2].source, "DER SPIEGEL");
    }

    #[test]
    fn test_missing_source_falls_back() {
        let items = parse_items(FEED.as_bytes(), 10).unwrap();
        assert_eq!(items[1].source, FALLBACK_SOURCE);
    }

    #[test]
    fn test_count_limits_items() {
        let items = parse_items(FEED.as_bytes(), 2).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].link, "https://news.google.com/articles/2");

        assert!(parse_items(FEED.as_bytes(), 0).unwrap().is_empty());
    }

    #[test]
    fn test_garbage_is_a_feed_error() {
        let result = parse_items(b"<html><body>Sorry</body></html>", 5);
        assert!(matches!(result, Err(Error::Feed(_))));
    }
}
