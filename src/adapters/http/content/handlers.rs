//! Handlers for the content endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};

use super::super::error::ApiError;
use super::super::middleware::AuthenticatedShop;
use super::super::AppState;
use super::dto::{DescriptionRequest, GenerateContentRequest};
use crate::application::handlers::content::{
    ContentBurstHandler, ContentOutcome, GenerateContentHandler,
};
use crate::domain::content::{ContentKind, GenerateRequest};

fn outcome_response(outcome: ContentOutcome) -> Response {
    let status = if outcome.is_denied() {
        StatusCode::FORBIDDEN
    } else {
        StatusCode::OK
    };
    (status, Json(outcome)).into_response()
}

pub async fn generate_description(
    State(state): State<AppState>,
    Extension(AuthenticatedShop(shop)): Extension<AuthenticatedShop>,
    Json(body): Json<DescriptionRequest>,
) -> Result<Response, ApiError> {
    if body.product_name.trim().is_empty() {
        return Err(ApiError::BadRequest("Product name is required".to_string()));
    }

    let tier = state.resolve_tier(&shop).await;
    let handler = GenerateContentHandler::new(
        state.model.clone(),
        state.shop_store.clone(),
        state.ledger.clone(),
    );
    let outcome = handler
        .handle(
            &shop,
            tier,
            ContentKind::ProductDescription,
            GenerateRequest {
                song_title: None,
                product_details: Some(body.product_details()),
            },
        )
        .await?;

    Ok(outcome_response(outcome))
}

pub async fn generate_content(
    State(state): State<AppState>,
    Extension(AuthenticatedShop(shop)): Extension<AuthenticatedShop>,
    Json(body): Json<GenerateContentRequest>,
) -> Result<Response, ApiError> {
    let tier = state.resolve_tier(&shop).await;
    let handler = GenerateContentHandler::new(
        state.model.clone(),
        state.shop_store.clone(),
        state.ledger.clone(),
    );
    let outcome = handler
        .handle(
            &shop,
            tier,
            body.content_type,
            GenerateRequest {
                song_title: body.song_title,
                product_details: body.product_details,
            },
        )
        .await?;

    Ok(outcome_response(outcome))
}

pub async fn content_burst(
    State(state): State<AppState>,
    Extension(AuthenticatedShop(shop)): Extension<AuthenticatedShop>,
) -> Result<Response, ApiError> {
    let session = state.admin_session(&shop).await?;
    let handler = ContentBurstHandler::new(state.model.clone(), state.admin.clone());
    let report = handler.handle(&session).await?;

    Ok(Json(serde_json::json!({
        "success": true,
        "count": report.count,
        "report": report.report,
    }))
    .into_response())
}
