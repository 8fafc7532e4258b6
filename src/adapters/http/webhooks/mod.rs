//! Platform webhook endpoints. HMAC-verified, no session token.

pub mod handlers;

use axum::routing::post;
use axum::Router;

use super::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/webhooks/app/uninstalled", post(handlers::app_uninstalled))
        .route("/webhooks/app/scopes-update", post(handlers::scopes_update))
}
