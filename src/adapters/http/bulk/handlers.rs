//! Handler for the bulk pipeline endpoint.
//!
//! This is the one surface gated by the anti-churn lock: a shop inside the
//! cooldown window after uninstalling gets a hard 403 before any mode runs.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use super::super::error::ApiError;
use super::super::middleware::AuthenticatedShop;
use super::super::AppState;
use super::dto::BulkRequest;
use crate::application::handlers::bulk::{
    AnalysisOutcome, AnalyzeProductsHandler, ApplyUpdatesHandler, ScanProductsHandler,
};
use crate::application::handlers::churn::CheckLockdownHandler;

pub async fn bulk(
    State(state): State<AppState>,
    Extension(AuthenticatedShop(shop)): Extension<AuthenticatedShop>,
    Json(body): Json<BulkRequest>,
) -> Result<Response, ApiError> {
    let lock = CheckLockdownHandler::new(state.churn_store.clone())
        .handle(&shop)
        .await;
    if lock.is_locked() {
        return Ok((
            StatusCode::FORBIDDEN,
            Json(serde_json::json!({
                "success": false,
                "error": "TRIAL_EXPIRED_LOCKDOWN",
            })),
        )
            .into_response());
    }

    match body {
        BulkRequest::Scan => {
            let session = state.admin_session(&shop).await?;
            let products = ScanProductsHandler::new(state.admin.clone())
                .handle(&session)
                .await?;
            Ok(Json(serde_json::json!({
                "success": true,
                "scannedResults": products,
            }))
            .into_response())
        }

        BulkRequest::Analyze { products } => {
            let tier = state.resolve_tier(&shop).await;
            let handler = AnalyzeProductsHandler::new(
                state.model.clone(),
                state.shop_store.clone(),
                state.ledger.clone(),
            );
            let outcome = handler.handle(&shop, tier, products).await?;
            let status = match &outcome {
                AnalysisOutcome::Denied { .. } => StatusCode::FORBIDDEN,
                AnalysisOutcome::Completed { .. } => StatusCode::OK,
            };
            Ok((status, Json(outcome)).into_response())
        }

        BulkRequest::Apply { products } => {
            let session = state.admin_session(&shop).await?;
            let handler = ApplyUpdatesHandler::new(state.admin.clone(), state.ledger.clone());
            let report = handler.handle(&shop, &session, products).await?;
            Ok(Json(serde_json::json!({
                "success": true,
                "report": report.report,
            }))
            .into_response())
        }
    }
}
