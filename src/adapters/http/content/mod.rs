//! Content generation endpoints.

pub mod dto;
pub mod handlers;

use axum::routing::post;
use axum::Router;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/content/description", post(handlers::generate_description))
        .route("/api/content/generate", post(handlers::generate_content))
        .route("/api/content/burst", post(handlers::content_burst))
}
