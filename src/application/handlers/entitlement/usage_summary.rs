//! GetUsageSummaryHandler - dashboard usage and overage report.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entitlement::{
    calculate_overage, next_reset_after, start_of_current_month, ActionCategory, MonthlyUsage,
    Overage, PlanTier, TierLimits,
};
use crate::domain::foundation::{DomainError, ShopDomain};
use crate::ports::UsageLedger;

/// One category row in the summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUsage {
    pub used: u32,
    /// None = unlimited.
    pub limit: Option<u32>,
    pub overage: Overage,
}

/// Current-month usage with pay-as-you-go overages for a shop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsageSummary {
    pub tier: PlanTier,
    pub tier_name: String,
    pub descriptions: CategoryUsage,
    pub ads: CategoryUsage,
    pub music_videos: CategoryUsage,
    pub total_overage_cents: u64,
    pub reset_date: DateTime<Utc>,
}

/// Builds the usage dashboard view: three monthly counters plus overages.
pub struct GetUsageSummaryHandler {
    ledger: Arc<dyn UsageLedger>,
}

impl GetUsageSummaryHandler {
    pub fn new(ledger: Arc<dyn UsageLedger>) -> Self {
        Self { ledger }
    }

    /// Counts this month's usage per category. Fail closed: any count error
    /// propagates rather than reporting zeros.
    pub async fn monthly_usage(&self, shop: &ShopDomain) -> Result<MonthlyUsage, DomainError> {
        let month_start = start_of_current_month();

        let descriptions = self
            .ledger
            .count_since(shop, ActionCategory::Description, month_start)
            .await?;
        let ads = self
            .ledger
            .count_since(shop, ActionCategory::Ad, month_start)
            .await?;
        let music_videos = self
            .ledger
            .count_since(shop, ActionCategory::MusicVideo, month_start)
            .await?;

        Ok(MonthlyUsage {
            descriptions,
            ads,
            music_videos,
            reset_date: next_reset_after(month_start),
        })
    }

    pub async fn handle(
        &self,
        shop: &ShopDomain,
        tier: PlanTier,
    ) -> Result<UsageSummary, DomainError> {
        let limits = TierLimits::for_tier(tier);
        let usage = self.monthly_usage(shop).await?;

        let row = |category: ActionCategory| {
            let used = usage.for_category(category);
            CategoryUsage {
                used,
                limit: limits.ceiling(category),
                overage: calculate_overage(&limits, category, used),
            }
        };

        let descriptions = row(ActionCategory::Description);
        let ads = row(ActionCategory::Ad);
        let music_videos = row(ActionCategory::MusicVideo);
        let total_overage_cents = descriptions.overage.cost_cents
            + ads.overage.cost_cents
            + music_videos.overage.cost_cents;

        Ok(UsageSummary {
            tier,
            tier_name: limits.tier.display_name().to_string(),
            descriptions,
            ads,
            music_videos,
            total_overage_cents,
            reset_date: usage.reset_date,
        })
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
    async fn summary_reports_per_category_counts() {
        let ledger = Arc::new(
            MockLedger::with_count(ActionCategory::Description, 42)
                .and_count(ActionCategory::Ad, 3)
                .and_count(ActionCategory::MusicVideo, 1),
        );
        let handler = GetUsageSummaryHandler::new(ledger);
        let summary = handler.handle(&shop(), PlanTier::Professional).await.unwrap();

        assert_eq!(summary.descriptions.used, 42);
        assert_eq!(summary.ads.used, 3);
        assert_eq!(summary.music_videos.used, 1);
        assert_eq!(summary.total_overage_cents, 0);
    }

    #[tokio::test]
    async fn summary_accumulates_overage_costs() {
        let ledger = Arc::new(
            MockLedger::with_count(ActionCategory::Description, 120)
                .and_count(ActionCategory::Ad, 17),
        );
        let handler = GetUsageSummaryHandler::new(ledger);
        let summary = handler.handle(&shop(), PlanTier::Starter).await.unwrap();

        // 20 descriptions over at 10c + 2 ads over at $1.
        assert_eq!(summary.descriptions.overage.units, 20);
        assert_eq!(summary.ads.overage.units, 2);
        assert_eq!(summary.total_overage_cents, 200 + 200);
    }

    #[tokio::test]
    async fn enterprise_summary_has_no_limits_or_overage() {
        let ledger = Arc::new(MockLedger::with_count(ActionCategory::Description, 10_000_000));
        let handler = GetUsageSummaryHandler::new(ledger);
        let summary = handler.handle(&shop(), PlanTier::Enterprise).await.unwrap();

        assert_eq!(summary.descriptions.limit, None);
        assert_eq!(summary.descriptions.overage, Overage::default());
    }

    #[tokio::test]
    async fn ledger_failure_propagates() {
        let handler = GetUsageSummaryHandler::new(Arc::new(MockLedger::failing()));
        assert!(handler.handle(&shop(), PlanTier::Free).await.is_err());
    }
}
