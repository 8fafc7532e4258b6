//! Persisted churn record, one row per shop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ShopDomain;

/// Per-shop churn history, upserted only by the uninstall webhook handler.
///
/// Absence of a record means the shop has never uninstalled. Repeated
/// uninstall events simply overwrite `last_uninstalled_at` (last write wins),
/// keeping the handler idempotent under at-least-once webhook delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnRecord {
    pub shop: ShopDomain,
    /// Set true on first uninstall, never cleared.
    pub trial_used: bool,
    /// Overwritten on each uninstall event.
    pub last_uninstalled_at: Option<DateTime<Utc>>,
}

impl ChurnRecord {
    /// Record produced by an uninstall event at `at`.
    pub fn uninstalled(shop: ShopDomain, at: DateTime<Utc>) -> Self {
        Self {
            shop,
            trial_used: true,
            last_uninstalled_at: Some(at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uninstall_sets_trial_used() {
        let shop = ShopDomain::new("a.myshopify.com").unwrap();
        let now = Utc::now();
        let record = ChurnRecord::uninstalled(shop, now);
        assert!(record.trial_used);
        assert_eq!(record.last_uninstalled_at, Some(now));
    }
}
