//! Shopify Admin Port - product catalog queries and mutations.
//!
//! Wraps the Admin GraphQL API. Responses arrive in a `data`/`errors`
//! envelope; mutations additionally return per-field `userErrors` which must
//! be checked explicitly - the absence of a GraphQL-level error does not
//! imply the mutation succeeded.

use async_trait::async_trait;
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::ShopDomain;

/// Per-request Admin API credentials resolved from the shop's session.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub shop: ShopDomain,
    pub access_token: Secret<String>,
}

/// A mutation-level user error returned by the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Errors from the Admin API.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Admin API rejected credentials")]
    Unauthorized,

    #[error("GraphQL errors: {0:?}")]
    Graphql(Vec<String>),

    /// Mutation-level userErrors - the request was accepted but the write
    /// did not happen.
    #[error("Mutation user errors: {0:?}")]
    UserErrors(Vec<UserError>),

    #[error("Invalid Admin API response: {0}")]
    InvalidResponse(String),

    #[error("Admin API request failed: {0}")]
    Network(String),
}

impl From<AdminError> for crate::domain::foundation::DomainError {
    fn from(err: AdminError) -> Self {
        use crate::domain::foundation::{DomainError, ErrorCode};
        let code = match err {
            AdminError::Unauthorized => ErrorCode::Unauthorized,
            _ => ErrorCode::AdminApiError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Product fields used by scan and analysis flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSummary {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub body_html: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

/// One image attached to a product's media.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaImage {
    pub id: String,
    pub url: String,
}

/// A product with its image media, for the alt-text pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMedia {
    pub id: String,
    pub title: String,
    pub images: Vec<MediaImage>,
}

/// Filters for a product batch fetch. Batches are capped at 5 items.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub first: u32,
    /// Platform search syntax, e.g. `-tag:content-locked` or `status:active`.
    pub search: Option<String>,
    pub reverse: bool,
}

/// Fields to overwrite in a product update.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdate {
    pub id: String,
    pub title: Option<String>,
    pub description_html: Option<String>,
}

/// Port for Admin GraphQL operations.
#[async_trait]
pub trait ShopifyAdmin: Send + Sync {
    /// Fetches a batch of products (id/title/description).
    async fn fetch_products(
        &self,
        session: &AdminSession,
        query: ProductQuery,
    ) -> Result<Vec<ProductSummary>, AdminError>;

    /// Fetches a batch of products with their image media.
    async fn fetch_media_batch(
        &self,
        session: &AdminSession,
        query: ProductQuery,
    ) -> Result<Vec<ProductMedia>, AdminError>;

    /// `productUpdate` mutation; surfaces userErrors as `AdminError::UserErrors`.
    async fn update_product(
        &self,
        session: &AdminSession,
        update: ProductUpdate,
    ) -> Result<(), AdminError>;

    /// `fileUpdate` mutation setting image alt text.
    async fn update_file_alt(
        &self,
        session: &AdminSession,
        file_id: &str,
        alt: &str,
    ) -> Result<(), AdminError>;

    /// `tagsAdd` mutation, used to lock processed products out of rescans.
    async fn add_tags(
        &self,
        session: &AdminSession,
        resource_id: &str,
        tags: &[String],
    ) -> Result<(), AdminError>;
}
