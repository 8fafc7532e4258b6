//! CheckLockdownHandler - derives the anti-churn lock state for a shop.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::churn::{lock_state, LockState};
use crate::domain::foundation::ShopDomain;
use crate::ports::ChurnStore;

/// Reads the churn record and derives the lock state.
///
/// Fails OPEN: a churn-store read failure is treated as Unlocked, unlike
/// usage accounting which fails closed.
pub struct CheckLockdownHandler {
    churn_store: Arc<dyn ChurnStore>,
}

impl CheckLockdownHandler {
    pub fn new(churn_store: Arc<dyn ChurnStore>) -> Self {
        Self { churn_store }
    }

    pub async fn handle(&self, shop: &ShopDomain) -> LockState {
        match self.churn_store.find(shop).await {
            Ok(record) => lock_state(record.as_ref(), Utc::now()),
            Err(e) => {
                tracing::error!(shop = %shop, error = %e, "churn check failed, failing open");
                LockState::Unlocked
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockChurnStore;
    use crate::domain::churn::ChurnRecord;
    use chrono::Months;

    fn shop() -> ShopDomain {
        ShopDomain::new("tenant.myshopify.com").unwrap()
    }

    #[tokio::test]
    async fn never_uninstalled_is_unlocked() {
        let handler = CheckLockdownHandler::new(Arc::new(MockChurnStore::empty()));
        assert_eq!(handler.handle(&shop()).await, LockState::Unlocked);
    }

    #[tokio::test]
    async fn recent_uninstall_is_locked() {
        let uninstalled_at = Utc::now() - Months::new(5);
        let record = ChurnRecord::uninstalled(shop(), uninstalled_at);
        let handler = CheckLockdownHandler::new(Arc::new(MockChurnStore::with_record(record)));
        assert_eq!(handler.handle(&shop()).await, LockState::Locked);
    }

    #[tokio::test]
    async fn old_uninstall_is_unlocked() {
        let uninstalled_at = Utc::now() - Months::new(7);
        let record = ChurnRecord::uninstalled(shop(), uninstalled_at);
        let handler = CheckLockdownHandler::new(Arc::new(MockChurnStore::with_record(record)));
        assert_eq!(handler.handle(&shop()).await, LockState::Unlocked);
    }

    #[tokio::test]
    async fn store_failure_fails_open() {
        let handler = CheckLockdownHandler::new(Arc::new(MockChurnStore::failing()));
        assert_eq!(handler.handle(&shop()).await, LockState::Unlocked);
    }
}
