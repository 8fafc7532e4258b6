//! Churn Store Port - per-shop uninstall history.
//!
//! Unlike the usage ledger, reads through this port are allowed to fail open:
//! the caller treats a read failure as Unlocked so a backing-store outage
//! never blocks a legitimate, already-installed merchant.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::churn::ChurnRecord;
use crate::domain::foundation::{DomainError, ShopDomain};

/// Port for the per-shop churn record.
#[async_trait]
pub trait ChurnStore: Send + Sync {
    /// Point lookup by tenant key. `None` means the shop never uninstalled.
    async fn find(&self, shop: &ShopDomain) -> Result<Option<ChurnRecord>, DomainError>;

    /// Upserts the record for an uninstall event: sets `trial_used = true`
    /// and overwrites `last_uninstalled_at` with `at`. Idempotent; the only
    /// writer of this entity.
    async fn record_uninstall(&self, shop: &ShopDomain, at: DateTime<Utc>)
        -> Result<(), DomainError>;
}
