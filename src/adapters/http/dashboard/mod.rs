//! Dashboard read endpoints.

pub mod handlers;

use axum::routing::get;
use axum::Router;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard/usage", get(handlers::usage))
        .route("/api/dashboard/status", get(handlers::status))
        .route("/api/dashboard/history", get(handlers::history))
}
