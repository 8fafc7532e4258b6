//! GenerateContentHandler - the multi-purpose content generator.
//!
//! Gates by feature and monthly ceiling, builds the prompt for the requested
//! content kind, runs extract-and-validate over the model output, and appends
//! a ledger entry on success.

use std::sync::Arc;

use serde::Serialize;

use crate::application::handlers::entitlement::CheckActionHandler;
use crate::domain::content::{
    content_prompt, extract_html, extract_json, BrandProfile, ContentKind, GenerateRequest,
};
use crate::domain::entitlement::{ActionDecision, Feature, PlanTier, TierLimits};
use crate::domain::foundation::{DomainError, ShopDomain};
use crate::ports::{ActionStatus, GenerativeModel, ShopStore, UsageEntry, UsageLedger};

/// Result of a content generation attempt.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ContentOutcome {
    Generated {
        success: bool,
        content: serde_json::Value,
        content_type: ContentKind,
        brand_context: String,
    },
    Denied {
        success: bool,
        error: String,
    },
}

impl ContentOutcome {
    fn generated(content: serde_json::Value, kind: ContentKind, brand: &BrandProfile) -> Self {
        ContentOutcome::Generated {
            success: true,
            content,
            content_type: kind,
            brand_context: brand.brand_name().to_string(),
        }
    }

    fn denied(reason: String) -> Self {
        ContentOutcome::Denied {
            success: false,
            error: reason,
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, ContentOutcome::Denied { .. })
    }
}

/// Feature flag guarding each content kind.
fn required_feature(kind: ContentKind) -> Feature {
    match kind {
        ContentKind::MusicVideo => Feature::MusicVideo,
        ContentKind::ProductAd => Feature::ProductAds,
        ContentKind::SongShowcase => Feature::SongShowcase,
        ContentKind::ProductDescription | ContentKind::General => Feature::DescriptionGenerator,
    }
}

pub struct GenerateContentHandler {
    model: Arc<dyn GenerativeModel>,
    shop_store: Arc<dyn ShopStore>,
    ledger: Arc<dyn UsageLedger>,
    check_action: CheckActionHandler,
}

impl GenerateContentHandler {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        shop_store: Arc<dyn ShopStore>,
        ledger: Arc<dyn UsageLedger>,
    ) -> Self {
        let check_action = CheckActionHandler::new(ledger.clone());
        Self {
            model,
            shop_store,
            ledger,
            check_action,
        }
    }

    pub async fn handle(
        &self,
        shop: &ShopDomain,
        tier: PlanTier,
        kind: ContentKind,
        request: GenerateRequest,
    ) -> Result<ContentOutcome, DomainError> {
        let limits = TierLimits::for_tier(tier);
        let feature = required_feature(kind);
        if !limits.has_feature(feature) {
            return Ok(ContentOutcome::denied(format!(
                "Your {} plan does not include this feature. Upgrade to unlock it.",
                limits.tier.display_name()
            )));
        }

        let category = kind.action_category();
        match self.check_action.handle(shop, tier, category).await? {
            ActionDecision::Denied { reason } => return Ok(ContentOutcome::denied(reason)),
            ActionDecision::Allowed => {}
        }

        let brand = self
            .shop_store
            .brand_profile(shop)
            .await?
            .unwrap_or_default();

        let prompt = content_prompt(kind, &request, &brand);
        let text = self.model.generate(&prompt).await?;

        let content: serde_json::Value = if kind.expects_json() {
            extract_json(&text)?
        } else {
            serde_json::Value::String(extract_html(&text)?)
        };

        self.ledger
            .record(UsageEntry {
                shop: shop.clone(),
                category,
                product_id: None,
                product_name: request.product_details.clone().or(request.song_title.clone()),
                content: content.clone(),
                model: self.model.model_name().to_string(),
                status: ActionStatus::Success,
            })
            .await?;

        Ok(ContentOutcome::generated(content, kind, &brand))
    }
}
