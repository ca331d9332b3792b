use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_COUNT: usize = 5;
pub const DEFAULT_PERIOD: &str = "1d";
pub const DEFAULT_LANGUAGE: &str = "de";
pub const DEFAULT_REGION: &str = "DE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub ai: bool,
    #[serde(default = "default_count", deserialize_with = "lenient_count")]
    pub count: usize,
    /// Keys this crate does not interpret; written back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Topic {
    fn default() -> Self {
        Self {
            name: String::new(),
            query: String::new(),
            ai: false,
            count: DEFAULT_COUNT,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_period")]
    pub scraping_period: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            scraping_period: default_period(),
            language: default_language(),
            region: default_region(),
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub topics: Vec<Topic>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Config {
    pub fn topic(&self, name: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.name == name)
    }

    /// Flags the first topic called `name` for AI summaries.
    /// Returns false when no topic matched.
    pub fn enable_ai(&mut self, name: &str) -> bool {
        match self.topics.iter_mut().find(|t| t.name == name) {
            Some(topic) => {
                topic.ai = true;
                true
            }
            None => false,
        }
    }
}

/// One headline as delivered by a news source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveItem {
    pub link: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

impl ArchiveItem {
    pub fn from_news(item: NewsItem, topic: Option<String>) -> Self {
        Self {
            link: item.link,
            title: item.title,
            published: item.published,
            source: item.source,
            topic,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub summary: String,
    /// Unix epoch seconds.
    #[serde(default)]
    pub timestamp: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedRequest {
    pub query: String,
    pub count: usize,
    pub period: String,
    pub language: String,
    pub region: String,
}

impl FeedRequest {
    pub fn new(query: impl Into<String>, count: usize, settings: &Settings) -> Self {
        Self {
            query: query.into(),
            count,
            period: settings.scraping_period.clone(),
            language: settings.language.clone(),
            region: settings.region.clone(),
        }
    }
}

/// Reads an article count the way form input arrives: a number, a numeric
/// string, or garbage. Anything unusable falls back to [`DEFAULT_COUNT`].
pub fn parse_count(value: &Value) -> usize {
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(*b as i64),
        _ => None,
    };
    match parsed {
        Some(n) => n.max(0) as usize,
        None => DEFAULT_COUNT,
    }
}

pub fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(parse_count(&value))
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

fn default_period() -> String {
    DEFAULT_PERIOD.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_defaults_when_settings_missing() {
        let config: Config = serde_json::from_value(json!({
            "topics": [{"name": "Tech", "query": "technologie"}]
        }))
        .unwrap();

        assert_eq!(config.settings, Settings::default());
        assert_eq!(config.settings.scraping_period, "1d");
        let topic = config.topic("Tech").unwrap();
        assert!(!topic.ai);
        assert_eq!(topic.count, DEFAULT_COUNT);
    }

    #[test]
    fn test_partial_settings_fill_in_defaults() {
        let settings: Settings = serde_json::from_value(json!({"language": "en"})).unwrap();
        assert_eq!(settings.language, "en");
        assert_eq!(settings.region, "DE");
        assert_eq!(settings.scraping_period, "1d");
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(&json!(8)), 8);
        assert_eq!(parse_count(&json!("12")), 12);
        assert_eq!(parse_count(&json!(3.9)), 3);
        assert_eq!(parse_count(&json!("viele")), DEFAULT_COUNT);
        assert_eq!(parse_count(&Value::Null), DEFAULT_COUNT);
        assert_eq!(parse_count(&json!(-4)), 0);
    }

    #[test]
    fn test_topic_count_accepts_strings() {
        let topic: Topic =
            serde_json::from_value(json!({"name": "A", "query": "a", "ai": true, "count": "7"}))
                .unwrap();
        assert_eq!(topic.count, 7);
    }

    #[test]
    fn test_unknown_keys_survive_a_rewrite() {
        let original = json!({
            "topics": [{"name": "A", "query": "a", "ai": false, "count": 3, "color": "red"}],
            "settings": {"scraping_period": "7d", "theme": "dark"},
            "version": 2
        });
        let mut config: Config = serde_json::from_value(original).unwrap();
        assert_eq!(config.topics[0].extra["color"], "red");

        config.enable_ai("A");
        let written = serde_json::to_value(&config).unwrap();

        assert_eq!(written["topics"][0]["color"], "red");
        assert_eq!(written["topics"][0]["ai"], true);
        assert_eq!(written["settings"]["theme"], "dark");
        assert_eq!(written["version"], 2);
    }

    #[test]
    fn test_enable_ai() {
        let mut config = Config {
            topics: vec![
                Topic { name: "A".into(), query: "a".into(), ..Default::default() },
                Topic { name: "B".into(), query: "b".into(), ..Default::default() },
            ],
            ..Default::default()
        };

        assert!(config.enable_ai("B"));
        assert!(!config.topics[0].ai);
        assert!(config.topics[1].ai);
        assert!(!config.enable_ai("missing"));
    }

    #[test]
    fn test_archive_item_without_topic_omits_field() {
        let item = ArchiveItem {
            link: "https://example.com/a".into(),
            title: "A".into(),
            published: "Mon, 01 Jan 2024 10:00:00 GMT".into(),
            source: "Example".into(),
            topic: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert!(value.get("topic").is_none());
    }

    #[test]
    fn test_cache_entry_missing_timestamp_is_zero() {
        let entry: CacheEntry = serde_json::from_value(json!({"summary": "<p>x</p>"})).unwrap();
        assert_eq!(entry.timestamp, 0.0);
    }
}
