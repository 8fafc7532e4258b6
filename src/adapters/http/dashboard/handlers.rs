//! Handlers for the dashboard read endpoints.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use super::super::error::ApiError;
use super::super::middleware::AuthenticatedShop;
use super::super::AppState;
use crate::application::handlers::churn::CheckLockdownHandler;
use crate::application::handlers::entitlement::GetUsageSummaryHandler;

const HISTORY_LIMIT: u32 = 20;

pub async fn usage(
    State(state): State<AppState>,
    Extension(AuthenticatedShop(shop)): Extension<AuthenticatedShop>,
) -> Result<Response, ApiError> {
    let tier = state.resolve_tier(&shop).await;
    let summary = GetUsageSummaryHandler::new(state.ledger.clone())
        .handle(&shop, tier)
        .await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "usage": summary,
    }))
    .into_response())
}

pub async fn status(
    State(state): State<AppState>,
    Extension(AuthenticatedShop(shop)): Extension<AuthenticatedShop>,
) -> Response {
    let lock = CheckLockdownHandler::new(state.churn_store.clone())
        .handle(&shop)
        .await;

    Json(serde_json::json!({
        "success": true,
        "is_locked": lock.is_locked(),
    }))
    .into_response()
}

pub async fn history(
    State(state): State<AppState>,
    Extension(AuthenticatedShop(shop)): Extension<AuthenticatedShop>,
) -> Result<Response, ApiError> {
    let records = state.ledger.recent(&shop, HISTORY_LIMIT).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "history": records,
    }))
    .into_response())
}
