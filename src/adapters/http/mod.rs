//! HTTP adapters - the app's API surface.
//!
//! Route modules mirror the admin UI's feature areas: content generation,
//! media optimization, the bulk pipeline, the dashboard reads, and the
//! platform webhooks. All `/api` routes require a verified session token;
//! webhook routes verify the HMAC signature instead.

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod bulk;
pub mod content;
pub mod dashboard;
pub mod error;
pub mod media;
pub mod middleware;
pub mod webhooks;

use crate::adapters::shopify::ShopifyWebhookVerifier;
use crate::application::handlers::entitlement::PlanResolver;
use crate::domain::entitlement::PlanTier;
use crate::domain::foundation::ShopDomain;
use crate::ports::{
    AdminSession, ChurnStore, GenerativeModel, ShopStore, ShopifyAdmin, UsageLedger,
};
use error::ApiError;
use middleware::{session_auth, SessionTokenVerifier};

/// Shared process-wide dependencies, injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub shop_store: Arc<dyn ShopStore>,
    pub ledger: Arc<dyn UsageLedger>,
    pub churn_store: Arc<dyn ChurnStore>,
    pub model: Arc<dyn GenerativeModel>,
    pub admin: Arc<dyn ShopifyAdmin>,
    pub session_verifier: Arc<SessionTokenVerifier>,
    pub webhook_verifier: Arc<ShopifyWebhookVerifier>,
    pub admin_shops: Vec<String>,
}

impl AppState {
    /// Effective plan tier for a shop, admin allowlist included.
    pub async fn resolve_tier(&self, shop: &ShopDomain) -> PlanTier {
        PlanResolver::new(self.shop_store.clone(), self.admin_shops.clone())
            .resolve(shop)
            .await
    }

    /// Admin API credentials for a shop, from its persisted session.
    pub async fn admin_session(&self, shop: &ShopDomain) -> Result<AdminSession, ApiError> {
        let token = self
            .shop_store
            .access_token(shop)
            .await?
            .ok_or_else(|| ApiError::unauthorized("No session for shop"))?;
        Ok(AdminSession {
            shop: shop.clone(),
            access_token: token,
        })
    }
}

/// Builds the full application router.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(content::routes())
        .merge(media::routes())
        .merge(bulk::routes())
        .merge(dashboard::routes())
        .layer(from_fn_with_state(
            state.session_verifier.clone(),
            session_auth,
        ));

    Router::new()
        .merge(api)
        .merge(webhooks::routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
