//! PostgreSQL implementation of the ChurnStore port.
//!
//! One row per shop in `churn_records`, upserted on uninstall. Repeat
//! uninstalls overwrite `last_uninstalled_at` (last write wins).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::churn::ChurnRecord;
use crate::domain::foundation::{DomainError, ErrorCode, ShopDomain};
use crate::ports::ChurnStore;

pub struct PostgresChurnStore {
    pool: PgPool,
}

impl PostgresChurnStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ChurnRow {
    shop: String,
    trial_used: bool,
    last_uninstalled_at: Option<DateTime<Utc>>,
}

impl TryFrom<ChurnRow> for ChurnRecord {
    type Error = DomainError;

    fn try_from(row: ChurnRow) -> Result<Self, Self::Error> {
        let shop = ShopDomain::new(&row.shop)
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Invalid shop: {e}")))?;
        Ok(ChurnRecord {
            shop,
            trial_used: row.trial_used,
            last_uninstalled_at: row.last_uninstalled_at,
        })
    }
}

#[async_trait]
impl ChurnStore for PostgresChurnStore {
    async fn find(&self, shop: &ShopDomain) -> Result<Option<ChurnRecord>, DomainError> {
        let row: Option<ChurnRow> = sqlx::query_as(
            r#"
            SELECT shop, trial_used, last_uninstalled_at
            FROM churn_records
            WHERE shop = $1
            "#,
        )
        .bind(shop.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to load churn record: {e}"),
            )
        })?;

        row.map(ChurnRecord::try_from).transpose()
    }

    async fn record_uninstall(
        &self,
        shop: &ShopDomain,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO churn_records (shop, trial_used, last_uninstalled_at)
            VALUES ($1, TRUE, $2)
            ON CONFLICT (shop)
            DO UPDATE SET trial_used = TRUE, last_uninstalled_at = EXCLUDED.last_uninstalled_at
            "#,
        )
        .bind(shop.as_str())
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to record uninstall: {e}"),
            )
        })?;

        Ok(())
    }
}
