//! Bulk pipeline endpoint.

pub mod dto;
pub mod handlers;

use axum::routing::post;
use axum::Router;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/bulk", post(handlers::bulk))
}
