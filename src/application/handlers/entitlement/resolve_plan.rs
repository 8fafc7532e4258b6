//! PlanResolver - maps a shop to its effective plan tier.

use std::sync::Arc;

use crate::domain::entitlement::PlanTier;
use crate::domain::foundation::ShopDomain;
use crate::ports::ShopStore;

/// Resolves the effective tier for a shop.
///
/// Resolution order:
/// 1. Shops on the configured admin allowlist are enterprise unconditionally.
/// 2. Otherwise the persisted session plan, parsed leniently.
/// 3. Missing session, unknown plan string, or a failed read all resolve to
///    free - a plan lookup failure must degrade access, never widen it, and
///    must not take the whole request down.
pub struct PlanResolver {
    shop_store: Arc<dyn ShopStore>,
    admin_shops: Vec<String>,
}

impl PlanResolver {
    pub fn new(shop_store: Arc<dyn ShopStore>, admin_shops: Vec<String>) -> Self {
        Self {
            shop_store,
            admin_shops,
        }
    }

    pub async fn resolve(&self, shop: &ShopDomain) -> PlanTier {
        if self.admin_shops.iter().any(|s| s == shop.as_str()) {
            return PlanTier::Enterprise;
        }

        match self.shop_store.plan(shop).await {
            Ok(Some(plan)) => PlanTier::parse(&plan).unwrap_or(PlanTier::Free),
            Ok(None) => PlanTier::Free,
            Err(e) => {
                tracing::warn!(shop = %shop, error = %e, "plan lookup failed, defaulting to free");
                PlanTier::Free
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockShopStore;

    fn shop() -> ShopDomain {
        ShopDomain::new("tenant.myshopify.com").unwrap()
    }

    #[tokio::test]
    async fn resolves_persisted_plan() {
        let store = Arc::new(MockShopStore::with_plan("professional"));
        let resolver = PlanResolver::new(store, vec![]);
        assert_eq!(resolver.resolve(&shop()).await, PlanTier::Professional);
    }

    #[tokio::test]
    async fn missing_session_is_free() {
        let store = Arc::new(MockShopStore::empty());
        let resolver = PlanResolver::new(store, vec![]);
        assert_eq!(resolver.resolve(&shop()).await, PlanTier::Free);
    }

    #[tokio::test]
    async fn unknown_plan_string_is_free() {
        let store = Arc::new(MockShopStore::with_plan("bogus"));
        let resolver = PlanResolver::new(store, vec![]);
        assert_eq!(resolver.resolve(&shop()).await, PlanTier::Free);
    }

    #[tokio::test]
    async fn read_failure_falls_back_to_free() {
        let store = Arc::new(MockShopStore::failing());
        let resolver = PlanResolver::new(store, vec![]);
        assert_eq!(resolver.resolve(&shop()).await, PlanTier::Free);
    }

    #[tokio::test]
    async fn admin_shop_is_enterprise_regardless_of_plan() {
        let store = Arc::new(MockShopStore::with_plan("free"));
        let resolver = PlanResolver::new(store, vec!["tenant.myshopify.com".to_string()]);
        assert_eq!(resolver.resolve(&shop()).await, PlanTier::Enterprise);
    }
}
