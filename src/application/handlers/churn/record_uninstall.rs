//! HandleUninstallHandler - processes the app/uninstalled webhook.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::foundation::{DomainError, ShopDomain};
use crate::ports::{ChurnStore, ShopStore};

/// Locks the churn data, then wipes the shop's session rows.
///
/// Idempotent under at-least-once webhook delivery: a repeated event simply
/// re-overwrites `last_uninstalled_at` (last write wins). Churn write
/// failures are fatal and propagate.
pub struct HandleUninstallHandler {
    churn_store: Arc<dyn ChurnStore>,
    shop_store: Arc<dyn ShopStore>,
}

impl HandleUninstallHandler {
    pub fn new(churn_store: Arc<dyn ChurnStore>, shop_store: Arc<dyn ShopStore>) -> Self {
        Self {
            churn_store,
            shop_store,
        }
    }

    pub async fn handle(&self, shop: &ShopDomain) -> Result<(), DomainError> {
        // Lock the churn data before wiping the session.
        self.churn_store.record_uninstall(shop, Utc::now()).await?;

        let removed = self.shop_store.delete_sessions(shop).await?;
        tracing::info!(shop = %shop, sessions_removed = removed, "app uninstalled");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{MockChurnStore, MockShopStore};

    fn shop() -> ShopDomain {
        ShopDomain::new("tenant.myshopify.com").unwrap()
    }

    #[tokio::test]
    async fn records_uninstall_and_wipes_sessions() {
        let churn = Arc::new(MockChurnStore::empty());
        let sessions = Arc::new(MockShopStore::with_plan("starter"));
        let handler = HandleUninstallHandler::new(churn.clone(), sessions.clone());

        handler.handle(&shop()).await.unwrap();

        assert_eq!(churn.uninstall_count(), 1);
        assert_eq!(sessions.deleted_count(), 1);
    }

    #[tokio::test]
    async fn repeated_event_overwrites_timestamp() {
        let churn = Arc::new(MockChurnStore::empty());
        let sessions = Arc::new(MockShopStore::empty());
        let handler = HandleUninstallHandler::new(churn.clone(), sessions);

        handler.handle(&shop()).await.unwrap();
        handler.handle(&shop()).await.unwrap();

        assert_eq!(churn.uninstall_count(), 2);
        let record = churn.current_record().expect("record after uninstall");
        assert!(record.trial_used);
        // Last write wins.
        assert_eq!(record.last_uninstalled_at, churn.last_uninstall_at());
    }

    #[tokio::test]
    async fn churn_write_failure_is_fatal() {
        let churn = Arc::new(MockChurnStore::failing());
        let sessions = Arc::new(MockShopStore::empty());
        let handler = HandleUninstallHandler::new(churn, sessions.clone());

        assert!(handler.handle(&shop()).await.is_err());
        // Session wipe must not have happened before the churn lock.
        assert_eq!(sessions.deleted_count(), 0);
    }
}
