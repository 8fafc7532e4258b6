//! Embedded-app session token authentication.
//!
//! The admin UI sends a Shopify session token as `Authorization: Bearer`.
//! Tokens are HS256 JWTs signed with the app's API secret; the shop domain
//! rides in the `dest` claim as a full https URL. The middleware validates
//! the token, resolves the shop, and injects it into request extensions for
//! handlers to read.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::super::error::ApiError;
use crate::domain::foundation::ShopDomain;

/// Verifier for embedded-app session tokens.
pub struct SessionTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug, Deserialize)]
struct SessionClaims {
    /// The shop's admin URL, e.g. `https://tenant.myshopify.com`.
    dest: String,
}

impl SessionTokenVerifier {
    pub fn new(api_secret: &Secret<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Shopify session tokens carry the API key as audience; the shared
        // secret already binds the token to this app.
        validation.validate_aud = false;
        Self {
            decoding_key: DecodingKey::from_secret(api_secret.expose_secret().as_bytes()),
            validation,
        }
    }

    /// Validates the token and resolves the shop from its `dest` claim.
    pub fn verify(&self, token: &str) -> Result<ShopDomain, ApiError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| ApiError::unauthorized(format!("Invalid session token: {e}")))?;

        ShopDomain::new(&data.claims.dest)
            .map_err(|e| ApiError::unauthorized(format!("Invalid dest claim: {e}")))
    }
}

/// Shop resolved from a verified session token.
#[derive(Debug, Clone)]
pub struct AuthenticatedShop(pub ShopDomain);

pub async fn session_auth(
    State(verifier): State<Arc<SessionTokenVerifier>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    let Some(token) = token else {
        return ApiError::unauthorized("Missing Authorization header").into_response();
    };

    match verifier.verify(token) {
        Ok(shop) => {
            request.extensions_mut().insert(AuthenticatedShop(shop));
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}
