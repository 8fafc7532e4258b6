//! ApplyUpdatesHandler - writes approved analysis results back to Shopify.
//!
//! Sequential over the submitted items. Each update rewrites the title and
//! description with the JSON-LD schema appended as a script block; on a
//! clean write the shop's ledger rows for that product flip to applied.
//! Mutation userErrors count as failures even when the request itself
//! succeeds.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ShopDomain};
use crate::ports::{AdminSession, ProductUpdate, ShopifyAdmin, UsageLedger};

/// One reviewed analysis result the merchant chose to apply.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyItem {
    pub product_id: String,
    pub optimized_title: String,
    pub optimized_html_description: String,
    #[serde(default)]
    pub json_ld_schema: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplyStatus {
    Applied,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyResult {
    pub product_id: String,
    pub status: ApplyStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplyReport {
    pub report: Vec<ApplyResult>,
}

pub struct ApplyUpdatesHandler {
    admin: Arc<dyn ShopifyAdmin>,
    ledger: Arc<dyn UsageLedger>,
}

impl ApplyUpdatesHandler {
    pub fn new(admin: Arc<dyn ShopifyAdmin>, ledger: Arc<dyn UsageLedger>) -> Self {
        Self { admin, ledger }
    }

    pub async fn handle(
        &self,
        shop: &ShopDomain,
        session: &AdminSession,
        items: Vec<ApplyItem>,
    ) -> Result<ApplyReport, DomainError> {
        let mut report = Vec::with_capacity(items.len());
        for item in items {
            report.push(self.apply_one(shop, session, item).await);
        }
        Ok(ApplyReport { report })
    }

    async fn apply_one(
        &self,
        shop: &ShopDomain,
        session: &AdminSession,
        item: ApplyItem,
    ) -> ApplyResult {
        let description = append_schema(&item.optimized_html_description, &item.json_ld_schema);
        let update = ProductUpdate {
            id: item.product_id.clone(),
            title: Some(item.optimized_title),
            description_html: Some(description),
        };

        if let Err(err) = self.admin.update_product(session, update).await {
            tracing::error!(product_id = %item.product_id, error = %err, "apply failed");
            return ApplyResult {
                product_id: item.product_id,
                status: ApplyStatus::Failed,
                error: Some(err.to_string()),
            };
        }

        // Ledger flip is best-effort; the storefront write already happened.
        if let Err(err) = self.ledger.mark_applied(shop, &item.product_id).await {
            tracing::warn!(product_id = %item.product_id, error = %err, "applied flag not recorded");
        }

        ApplyResult {
            product_id: item.product_id,
            status: ApplyStatus::Applied,
            error: None,
        }
    }
}

/// Appends the JSON-LD schema as a script block, when one is present.
fn append_schema(description_html: &str, schema: &str) -> String {
    if schema.trim().is_empty() {
        return description_html.to_string();
    }
    format!("{description_html}\n\n<script type=\"application/ld+json\">{schema}</script>")
}
