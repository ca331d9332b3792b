use std::collections::BTreeMap;

use html_escape::{encode_double_quoted_attribute, encode_text};
use nd_core::{ArchiveItem, Config};
use nd_storage::archive::{display_topic, topic_color};

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");
const ARCHIVE_TEMPLATE: &str = include_str!("../templates/archive.html");
const EMPTY_ARCHIVE_ROW: &str =
    r#"    <li class="list-group-item text-muted">Noch keine Artikel gespeichert.</li>"#;

/// Shell page; the topics themselves are loaded by the browser through the API.
pub fn index_page(config: &Config, saved_links: &[String]) -> String {
    INDEX_TEMPLATE
        .replace("{{CONFIG_JSON}}", &script_json(config))
        .replace("{{SAVED_LINKS_JSON}}", &script_json(saved_links))
}

/// `items` must already be in display order.
pub fn archive_page(items: &[ArchiveItem], colors: &BTreeMap<String, &'static str>) -> String {
    let rows = if items.is_empty() {
        EMPTY_ARCHIVE_ROW.to_string()
    } else {
        items
            .iter()
            .map(|item| archive_row(item, colors))
            .collect::<Vec<_>>()
            .join("\n")
    };

    ARCHIVE_TEMPLATE
        .replace("{{COUNT}}", &items.len().to_string())
        .replace("{{ROWS}}", &rows)
}

fn archive_row(item: &ArchiveItem, colors: &BTreeMap<String, &'static str>) -> String {
    let topic = display_topic(item);
    let color = colors.get(topic).copied().unwrap_or_else(|| topic_color(topic));
    let link = encode_double_quoted_attribute(&item.link);

    format!(
        r#"    <li class="list-group-item d-flex justify-content-between align-items-start">
      <div>
        <span class="badge {color} me-2">{topic}</span>
        <a href="{link}" target="_blank">{title}</a>
        <div class="small text-muted">{source} · {published}</div>
      </div>
      <button class="btn btn-sm btn-outline-danger" data-remove="{link}">Entfernen</button>
    </li>"#,
        color = color,
        topic = encode_text(topic),
        link = link,
        title = encode_text(&item.title),
        source = encode_text(&item.source),
        published = encode_text(&item.published),
    )
}

/// JSON that is safe to inline in a `<script>` element.
fn script_json<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
        .replace("<!--", "<\\!--")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_core::Topic;

    fn item(link: &str, topic: Option<&str>) -> ArchiveItem {
        ArchiveItem {
            link: link.to_string(),
            title: "Titel".to_string(),
            published: "Mon, 03 Jun 2024 07:00:00 GMT".to_string(),
            source: "Quelle".to_string(),
            topic: topic.map(str::to_string),
        }
    }

    #[test]
    fn test_index_embeds_config_safely() {
        let config = Config {
            topics: vec![Topic {
                name: "</script><script>alert(1)".into(),
                query: "x".into(),
                ai: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        let html = index_page(&config, &["https://a".to_string()]);

        assert!(!html.contains("</script><script>alert(1)"));
        assert!(html.contains(r#"<\/script><script>alert(1)"#));
        assert!(html.contains(r#"["https://a"]"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn test_archive_rows_use_topic_colors() {
        let items = vec![item("https://a", Some("Sport")), item("https://b\"x", None)];
        let mut colors = BTreeMap::new();
        colors.insert("Sport".to_string(), "bg-danger");
        colors.insert("Unbekannt".to_string(), topic_color("Unbekannt"));

        let html = archive_page(&items, &colors);

        assert!(html.contains(r#"<span class="badge bg-danger me-2">Sport</span>"#));
        assert!(html.contains(">Unbekannt</span>"));
        assert!(html.contains(r#"data-remove="https://b&quot;x""#));
        assert!(html.contains("Archiv (2)"));
    }

    #[test]
    fn test_empty_archive() {
        let html = archive_page(&[], &BTreeMap::new());
        assert!(html.contains("Noch keine Artikel gespeichert."));
        assert!(html.contains("Archiv (0)"));
    }
}
