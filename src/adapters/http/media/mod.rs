//! Media optimization endpoint.

pub mod handlers;

use axum::routing::post;
use axum::Router;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/media/optimize", post(handlers::optimize_media))
}
