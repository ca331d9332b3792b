use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod error;
pub mod handlers;
pub mod pages;
pub mod state;

pub use error::AppError;
pub use state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/archive", get(handlers::archive_page))
        .route("/health", get(handlers::health))
        .route("/api/get_topic_data", post(handlers::get_topic_data))
        .route("/api/archive/add", post(handlers::archive_add))
        .route("/api/archive/remove", post(handlers::archive_remove))
        .route("/api/save_config", post(handlers::save_config))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

pub mod prelude {
    pub use nd_core::{Result, Error};
    pub use crate::{create_app, AppState};
}
