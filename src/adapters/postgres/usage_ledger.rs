//! PostgreSQL implementation of the UsageLedger port.
//!
//! One row per completed action in `usage_ledger`. Counts are aggregated on
//! read; rows are never deleted, and the only update is the applied-status
//! flip after a successful Shopify write.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entitlement::ActionCategory;
use crate::domain::foundation::{DomainError, ErrorCode, ShopDomain};
use crate::ports::{ActionStatus, LedgerRecord, UsageEntry, UsageLedger};

pub struct PostgresUsageLedger {
    pool: PgPool,
}

impl PostgresUsageLedger {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LedgerRow {
    shop: String,
    category: String,
    product_id: Option<String>,
    product_name: Option<String>,
    content: serde_json::Value,
    model: String,
    status: String,
    occurred_at: DateTime<Utc>,
}

impl TryFrom<LedgerRow> for LedgerRecord {
    type Error = DomainError;

    fn try_from(row: LedgerRow) -> Result<Self, Self::Error> {
        let shop = ShopDomain::new(&row.shop)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid shop: {e}")))?;
        let category = ActionCategory::parse(&row.category).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid category value: {}", row.category),
            )
        })?;
        let status = ActionStatus::parse(&row.status).ok_or_else(|| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid status value: {}", row.status),
            )
        })?;

        Ok(LedgerRecord {
            shop,
            category,
            product_id: row.product_id,
            product_name: row.product_name,
            content: row.content,
            model: row.model,
            status,
            occurred_at: row.occurred_at,
        })
    }
}

#[async_trait]
impl UsageLedger for PostgresUsageLedger {
    async fn record(&self, entry: UsageEntry) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO usage_ledger (
                id, shop, category, product_id, product_name, content, model, status, occurred_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(entry.shop.as_str())
        .bind(entry.category.as_str())
        .bind(&entry.product_id)
        .bind(&entry.product_name)
        .bind(&entry.content)
        .bind(&entry.model)
        .bind(entry.status.as_str())
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to record usage: {e}"),
            )
        })?;

        Ok(())
    }

    async fn count_since(
        &self,
        shop: &ShopDomain,
        category: ActionCategory,
        since: DateTime<Utc>,
    ) -> Result<u32, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM usage_ledger
            WHERE shop = $1 AND category = $2 AND occurred_at >= $3
            "#,
        )
        .bind(shop.as_str())
        .bind(category.as_str())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count usage: {e}"),
            )
        })?;

        Ok(count.try_into().unwrap_or(u32::MAX))
    }

    async fn count_all_since(
        &self,
        shop: &ShopDomain,
        since: DateTime<Utc>,
    ) -> Result<u32, DomainError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM usage_ledger
            WHERE shop = $1 AND occurred_at >= $2
            "#,
        )
        .bind(shop.as_str())
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to count usage: {e}"),
            )
        })?;

        Ok(count.try_into().unwrap_or(u32::MAX))
    }

    async fn recent(&self, shop: &ShopDomain, limit: u32) -> Result<Vec<LedgerRecord>, DomainError> {
        let rows: Vec<LedgerRow> = sqlx::query_as(
            r#"
            SELECT shop, category, product_id, product_name, content, model, status, occurred_at
            FROM usage_ledger
            WHERE shop = $1
            ORDER BY occurred_at DESC
            LIMIT $2
            "#,
        )
        .bind(shop.as_str())
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load history: {e}"),
            )
        })?;

        rows.into_iter().map(LedgerRecord::try_from).collect()
    }

    async fn mark_applied(&self, shop: &ShopDomain, product_id: &str) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            UPDATE usage_ledger SET status = $3
            WHERE shop = $1 AND product_id = $2 AND status = $4
            "#,
        )
        .bind(shop.as_str())
        .bind(product_id)
        .bind(ActionStatus::Applied.as_str())
        .bind(ActionStatus::Success.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to mark applied: {e}"),
            )
        })?;

        Ok(())
    }
}
