use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use nd_core::{lenient_count, ArchiveItem, Config, FeedRequest, NewsItem, DEFAULT_COUNT};
use nd_storage::archive::topic_colors;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, error, warn};

use crate::error::Result;
use crate::pages;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct TopicDataRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default = "default_count", deserialize_with = "lenient_count")]
    pub count: usize,
    #[serde(default = "default_true")]
    pub ai: bool,
    #[serde(default)]
    pub refresh: bool,
    #[serde(default)]
    pub save_ai: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TopicDataResponse {
    pub articles: Vec<NewsItem>,
    pub summary: String,
}

#[derive(Debug, Deserialize)]
pub struct RemoveRequest {
    #[serde(default)]
    pub link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
}

impl StatusResponse {
    fn success(message: &str) -> Json<Self> {
        Json(Self { status: "success", message: message.to_string() })
    }

    fn error(message: String) -> Json<Self> {
        Json(Self { status: "error", message })
    }
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

fn default_true() -> bool {
    true
}

pub async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let config = state.storage.config.load()?;
    let mut saved_links: Vec<String> = state.storage.archive.links()?.into_iter().collect();
    saved_links.sort();
    Ok(Html(pages::index_page(&config, &saved_links)))
}

pub async fn health() -> &'static str {
    "ok"
}

/// Headlines plus (optionally) a summary for one topic. With `save_ai` the
/// topic's AI flag is switched on and persisted before anything is fetched.
pub async fn get_topic_data(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TopicDataRequest>,
) -> Result<Json<TopicDataResponse>> {
    let name = request.name.unwrap_or_default();

    let config = if request.save_ai {
        state.storage.config.enable_ai(&name)?
    } else {
        state.storage.config.load()?
    };

    let articles = match request.query.as_deref().filter(|q| !q.is_empty()) {
        Some(query) => {
            let feed_request = FeedRequest::new(query, request.count, &config.settings);
            state.source.fetch(&feed_request).await.unwrap_or_else(|e| {
                warn!("{} fetch for '{}' failed: {}", state.source.name(), query, e);
                Vec::new()
            })
        }
        None => Vec::new(),
    };

    let summary = if !articles.is_empty() && request.ai {
        state.summaries.get_summary(&name, &articles, request.refresh).await?
    } else {
        String::new()
    };

    debug!("Topic '{}': {} articles", name, articles.len());
    Ok(Json(TopicDataResponse { articles, summary }))
}

pub async fn archive_page(State(state): State<Arc<AppState>>) -> Result<Html<String>> {
    let items = state.storage.archive.list_sorted()?;
    let colors = topic_colors(&items);
    Ok(Html(pages::archive_page(&items, &colors)))
}

pub async fn archive_add(
    State(state): State<Arc<AppState>>,
    Json(item): Json<ArchiveItem>,
) -> Result<Json<StatusResponse>> {
    state.storage.archive.add(item)?;
    Ok(StatusResponse::success("Artikel gespeichert."))
}

pub async fn archive_remove(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RemoveRequest>,
) -> Result<Json<StatusResponse>> {
    match request.link {
        Some(link) => state.storage.archive.remove(&link)?,
        None => debug!("Archive remove without link"),
    }
    Ok(StatusResponse::success("Artikel entfernt."))
}

/// Any failure, including a body that is not a valid config, is reported
/// as a 500 with a JSON status so the page can show the message.
pub async fn save_config(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Config>, JsonRejection>,
) -> Response {
    let result = match payload {
        Ok(Json(config)) => state.storage.config.save(&config).map_err(|e| e.to_string()),
        Err(rejection) => Err(rejection.body_text()),
    };

    match result {
        Ok(()) => StatusResponse::success("Konfiguration gespeichert.").into_response(),
        Err(message) => {
            error!("Failed to save config: {}", message);
            let body = StatusResponse::error(message);
            (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
        }
    }
}
