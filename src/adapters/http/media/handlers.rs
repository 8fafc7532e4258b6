//! Handler for the media optimization endpoint.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use super::super::error::ApiError;
use super::super::middleware::AuthenticatedShop;
use super::super::AppState;
use crate::application::handlers::media::OptimizeMediaHandler;

pub async fn optimize_media(
    State(state): State<AppState>,
    Extension(AuthenticatedShop(shop)): Extension<AuthenticatedShop>,
) -> Result<Response, ApiError> {
    let session = state.admin_session(&shop).await?;
    let handler = OptimizeMediaHandler::new(
        state.model.clone(),
        state.admin.clone(),
        state.shop_store.clone(),
    );
    let report = handler.handle(&shop, &session).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "report": report.report,
    }))
    .into_response())
}
