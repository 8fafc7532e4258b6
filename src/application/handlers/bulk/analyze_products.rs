//! AnalyzeProductsHandler - per-product SEO analysis with ledger logging.
//!
//! Gated twice: the plan must include the bulk analyzer feature, and total
//! ledger activity for the month must be under the plan's description
//! ceiling. Products are analyzed one at a time; each success appends a
//! ledger row, each failure is captured in the report and skipped.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::content::{
    analysis_prompt, extract_json, json_ld_fallback, json_ld_prompt, BrandProfile, ProductAnalysis,
};
use crate::domain::entitlement::{
    start_of_current_month, ActionCategory, Feature, PlanTier, TierLimits,
};
use crate::domain::foundation::{DomainError, ShopDomain};
use crate::ports::{ActionStatus, GenerativeModel, ProductSummary, ShopStore, UsageEntry, UsageLedger};

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisItem {
    pub product_id: String,
    pub current_title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<ProductAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Completed { success: bool, results: Vec<AnalysisItem> },
    Denied { success: bool, error: String },
}

impl AnalysisOutcome {
    fn denied(reason: impl Into<String>) -> Self {
        AnalysisOutcome::Denied {
            success: false,
            error: reason.into(),
        }
    }

    pub fn is_denied(&self) -> bool {
        matches!(self, AnalysisOutcome::Denied { .. })
    }
}

pub struct AnalyzeProductsHandler {
    model: Arc<dyn GenerativeModel>,
    shop_store: Arc<dyn ShopStore>,
    ledger: Arc<dyn UsageLedger>,
}

impl AnalyzeProductsHandler {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        shop_store: Arc<dyn ShopStore>,
        ledger: Arc<dyn UsageLedger>,
    ) -> Self {
        Self {
            model,
            shop_store,
            ledger,
        }
    }

    pub async fn handle(
        &self,
        shop: &ShopDomain,
        tier: PlanTier,
        products: Vec<ProductSummary>,
    ) -> Result<AnalysisOutcome, DomainError> {
        let limits = TierLimits::for_tier(tier);
        if !limits.has_feature(Feature::BulkAnalyzer) {
            return Ok(AnalysisOutcome::denied(
                "Please upgrade to Starter to use the bulk analyzer.",
            ));
        }

        // The bulk pass bills against the description ceiling, counted over
        // all ledger activity this month. A failed count denies the batch.
        let since = start_of_current_month();
        let current = self.ledger.count_all_since(shop, since).await?;
        if limits.limit_reached(ActionCategory::Description, current) {
            return Ok(AnalysisOutcome::denied(
                "Monthly limit reached. Upgrade your plan to keep analyzing.",
            ));
        }

        let brand = self
            .shop_store
            .brand_profile(shop)
            .await?
            .unwrap_or_default();

        let mut results = Vec::with_capacity(products.len());
        for product in products {
            results.push(self.analyze_one(shop, &brand, product).await);
        }

        Ok(AnalysisOutcome::Completed {
            success: true,
            results,
        })
    }

    async fn analyze_one(
        &self,
        shop: &ShopDomain,
        brand: &BrandProfile,
        product: ProductSummary,
    ) -> AnalysisItem {
        match self.try_analyze(shop, brand, &product).await {
            Ok(analysis) => AnalysisItem {
                product_id: product.id,
                current_title: product.title,
                analysis: Some(analysis),
                error: None,
            },
            Err(err) => {
                tracing::error!(product_id = %product.id, error = %err, "analysis failed");
                AnalysisItem {
                    product_id: product.id,
                    current_title: product.title,
                    analysis: None,
                    error: Some(err.to_string()),
                }
            }
        }
    }

    async fn try_analyze(
        &self,
        shop: &ShopDomain,
        brand: &BrandProfile,
        product: &ProductSummary,
    ) -> Result<ProductAnalysis, DomainError> {
        let prompt = analysis_prompt(
            &product.title,
            product.body_html.as_deref().unwrap_or(""),
            brand,
        );
        let text = self.model.generate(&prompt).await?;
        let mut analysis: ProductAnalysis = extract_json(&text)?;

        if analysis.json_ld_schema.trim().is_empty() {
            analysis.json_ld_schema = self
                .schema_for(&analysis.optimized_title, product.price.as_deref())
                .await;
        }

        self.ledger
            .record(UsageEntry {
                shop: shop.clone(),
                category: ActionCategory::Description,
                product_id: Some(product.id.clone()),
                product_name: Some(product.title.clone()),
                content: serde_json::json!({
                    "title": analysis.optimized_title,
                    "description": analysis.optimized_html_description,
                    "schema": analysis.json_ld_schema,
                }),
                model: self.model.model_name().to_string(),
                status: ActionStatus::Success,
            })
            .await?;

        Ok(analysis)
    }

    /// Standalone JSON-LD generation; any failure degrades to the minimal
    /// hard-coded Product schema rather than failing the item.
    async fn schema_for(&self, product_title: &str, price: Option<&str>) -> String {
        let price = price.unwrap_or("19.99");
        let generated = match self.model.generate(&json_ld_prompt(product_title, price, "USD")).await {
            Ok(text) => extract_json::<serde_json::Value>(&text).ok(),
            Err(err) => {
                tracing::warn!(error = %err, "schema generation failed, using fallback");
                None
            }
        };
        let value = generated.unwrap_or_else(|| json_ld_fallback(product_title, price, "USD"));
        value.to_string()
    }
}
