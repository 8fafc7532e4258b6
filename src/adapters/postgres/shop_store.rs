//! PostgreSQL implementation of the ShopStore port.
//!
//! Reads span two tables: `shop_sessions` (install session with plan and
//! Admin API token, written by the OAuth layer) and `shop_profiles` (brand
//! onboarding answers). Sessions keyed by shop; a shop can hold several
//! session rows, the newest wins.

use async_trait::async_trait;
use secrecy::Secret;
use sqlx::PgPool;

use crate::domain::content::BrandProfile;
use crate::domain::foundation::{DomainError, ErrorCode, ShopDomain};
use crate::ports::ShopStore;

pub struct PostgresShopStore {
    pool: PgPool,
}

impl PostgresShopStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    brand_name: Option<String>,
    identity_summary: Option<String>,
    target_audience: Option<String>,
    usp: Option<String>,
}

impl From<ProfileRow> for BrandProfile {
    fn from(row: ProfileRow) -> Self {
        BrandProfile {
            brand_name: row.brand_name,
            identity_summary: row.identity_summary,
            target_audience: row.target_audience,
            usp: row.usp,
        }
    }
}

fn db_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{context}: {e}"))
}

#[async_trait]
impl ShopStore for PostgresShopStore {
    async fn plan(&self, shop: &ShopDomain) -> Result<Option<String>, DomainError> {
        let plan: Option<Option<String>> = sqlx::query_scalar(
            r#"
            SELECT plan FROM shop_sessions
            WHERE shop = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(shop.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load plan", e))?;

        Ok(plan.flatten())
    }

    async fn access_token(
        &self,
        shop: &ShopDomain,
    ) -> Result<Option<Secret<String>>, DomainError> {
        let token: Option<String> = sqlx::query_scalar(
            r#"
            SELECT access_token FROM shop_sessions
            WHERE shop = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(shop.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load access token", e))?;

        Ok(token.map(Secret::new))
    }

    async fn brand_profile(
        &self,
        shop: &ShopDomain,
    ) -> Result<Option<BrandProfile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            r#"
            SELECT brand_name, identity_summary, target_audience, usp
            FROM shop_profiles
            WHERE shop = $1
            "#,
        )
        .bind(shop.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to load brand profile", e))?;

        Ok(row.map(BrandProfile::from))
    }

    async fn delete_sessions(&self, shop: &ShopDomain) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM shop_sessions WHERE shop = $1")
            .bind(shop.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete sessions", e))?;

        Ok(result.rows_affected())
    }
}
