//! Platform webhook handlers.
//!
//! Deliveries are verified against the raw body bytes before anything is
//! parsed. Handlers are idempotent: replays of the uninstall notification
//! re-overwrite the same churn record.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::super::error::ApiError;
use super::super::AppState;
use crate::application::handlers::churn::HandleUninstallHandler;
use crate::domain::foundation::ShopDomain;

const HMAC_HEADER: &str = "x-shopify-hmac-sha256";
const SHOP_HEADER: &str = "x-shopify-shop-domain";

/// Verifies the delivery signature and resolves the originating shop.
fn verified_shop(
    state: &AppState,
    headers: &HeaderMap,
    body: &Bytes,
) -> Result<ShopDomain, ApiError> {
    let signature = headers
        .get(HMAC_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("Missing HMAC header"))?;

    state
        .webhook_verifier
        .verify(body, signature)
        .map_err(|e| ApiError::unauthorized(e.to_string()))?;

    let shop = headers
        .get(SHOP_HEADER)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::BadRequest("Missing shop domain header".to_string()))?;

    ShopDomain::new(shop).map_err(|e| ApiError::BadRequest(format!("Invalid shop domain: {e}")))
}

pub async fn app_uninstalled(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let shop = verified_shop(&state, &headers, &body)?;

    tracing::info!(shop = %shop, "app uninstalled");

    HandleUninstallHandler::new(state.churn_store.clone(), state.shop_store.clone())
        .handle(&shop)
        .await?;

    Ok((StatusCode::OK, Json(serde_json::json!({ "success": true }))).into_response())
}

pub async fn scopes_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let shop = verified_shop(&state, &headers, &body)?;

    // Nothing to persist; acknowledged so the platform stops redelivering.
    tracing::info!(shop = %shop, "app scopes updated");

    Ok((StatusCode::OK, Json(serde_json::json!({ "success": true }))).into_response())
}
