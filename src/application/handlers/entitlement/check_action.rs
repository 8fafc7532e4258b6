//! CheckActionHandler - decides whether a shop may perform an action now.

use std::sync::Arc;

use crate::domain::entitlement::{
    next_reset_after, start_of_current_month, ActionCategory, ActionDecision, PlanTier, TierLimits,
};
use crate::domain::foundation::{DomainError, ShopDomain};
use crate::ports::UsageLedger;

/// Decides whether a shop on a given plan may perform an action.
///
/// The ledger count reflects usage as it stood before this action, so the
/// `>=` comparison in the catalog denies exactly when the prior count already
/// met the ceiling. A failed count propagates (fail closed): zero would mean
/// unlimited access during an outage.
pub struct CheckActionHandler {
    ledger: Arc<dyn UsageLedger>,
}

impl CheckActionHandler {
    pub fn new(ledger: Arc<dyn UsageLedger>) -> Self {
        Self { ledger }
    }

    pub async fn handle(
        &self,
        shop: &ShopDomain,
        tier: PlanTier,
        category: ActionCategory,
    ) -> Result<ActionDecision, DomainError> {
        let limits = TierLimits::for_tier(tier);

        let month_start = start_of_current_month();
        let current_usage = self.ledger.count_since(shop, category, month_start).await?;

        if limits.limit_reached(category, current_usage) {
            let ceiling = limits.ceiling(category).unwrap_or(0);
            let reset = next_reset_after(month_start);
            return Ok(ActionDecision::denied(format!(
                "Monthly limit reached ({ceiling}/{ceiling}). Upgrade your plan or wait until {}.",
                reset.format("%Y-%m-%d")
            )));
        }

        Ok(ActionDecision::Allowed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockLedger;

    fn shop() -> ShopDomain {
        ShopDomain::new("tenant.myshopify.com").unwrap()
    }

    #[tokio::test]
    async fn allows_under_ceiling() {
        let ledger = Arc::new(MockLedger::with_count(ActionCategory::Description, 99));
        let handler = CheckActionHandler::new(ledger);
        let decision = handler
            .handle(&shop(), PlanTier::Starter, ActionCategory::Description)
            .await
            .unwrap();
        assert!(decision.is_allowed());
    }

    #[tokio::test]
    async fn denies_at_ceiling_with_reason() {
        let ledger = Arc::new(MockLedger::with_count(ActionCategory::Description, 100));
        let handler = CheckActionHandler::new(ledger);
        let decision = handler
            .handle(&shop(), PlanTier::Starter, ActionCategory::Description)
            .await
            .unwrap();
        match decision {
            ActionDecision::Denied { reason } => {
                assert!(reason.contains("100/100"));
                assert!(reason.contains("Upgrade"));
            }
            ActionDecision::Allowed => panic!("expected denial"),
        }
    }

    #[tokio::test]
    async fn unlimited_plan_always_allowed() {
        let ledger = Arc::new(MockLedger::with_count(ActionCategory::Description, 10_000_000));
        let handler = CheckActionHandler::new(ledger);
        let decision = handler
            .handle(&shop(), PlanTier::Enterprise, ActionCategory::Description)
            .await
            .unwrap();
        assert!(decision.is_allowed());
    }

    #[tokio::test]
    async fn zero_ceiling_denies_first_action() {
        let ledger = Arc::new(MockLedger::with_count(ActionCategory::Ad, 0));
        let handler = CheckActionHandler::new(ledger);
        let decision = handler
            .handle(&shop(), PlanTier::Free, ActionCategory::Ad)
            .await
            .unwrap();
        assert!(!decision.is_allowed());
    }

    #[tokio::test]
    async fn ledger_failure_propagates_not_allows() {
        let ledger = Arc::new(MockLedger::failing());
        let handler = CheckActionHandler::new(ledger);
        let result = handler
            .handle(&shop(), PlanTier::Starter, ActionCategory::Description)
            .await;
        assert!(result.is_err());
    }
}
