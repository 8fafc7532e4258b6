//! ContentBurstHandler - batch title/description rewrite.
//!
//! Fetches up to five products that have not been rewritten yet, fans out a
//! generate-update-tag pipeline over all of them concurrently, and reports
//! per-item outcomes. A failed item is reported and skipped; prior successes
//! in the same batch are not rolled back.

use std::sync::Arc;

use futures::future::join_all;
use serde::Serialize;

use crate::domain::content::{burst_prompt, extract_json, BurstRewrite};
use crate::domain::foundation::DomainError;
use crate::ports::{
    AdminSession, GenerativeModel, ProductQuery, ProductSummary, ProductUpdate, ShopifyAdmin,
};

/// Search term excluding already-rewritten products.
const BURST_LOCK_TAG: &str = "content-locked";
const BURST_BATCH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BurstStatus {
    Optimized,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct BurstItem {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub status: BurstStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct BurstReport {
    pub count: usize,
    pub report: Vec<BurstItem>,
}

pub struct ContentBurstHandler {
    model: Arc<dyn GenerativeModel>,
    admin: Arc<dyn ShopifyAdmin>,
}

impl ContentBurstHandler {
    pub fn new(model: Arc<dyn GenerativeModel>, admin: Arc<dyn ShopifyAdmin>) -> Self {
        Self { model, admin }
    }

    pub async fn handle(&self, session: &AdminSession) -> Result<BurstReport, DomainError> {
        let products = self
            .admin
            .fetch_products(
                session,
                ProductQuery {
                    first: BURST_BATCH,
                    search: Some(format!("-tag:{BURST_LOCK_TAG}")),
                    reverse: false,
                },
            )
            .await?;

        let items = join_all(
            products
                .iter()
                .map(|product| self.rewrite_one(session, product)),
        )
        .await;

        Ok(BurstReport {
            count: items.len(),
            report: items,
        })
    }

    async fn rewrite_one(&self, session: &AdminSession, product: &ProductSummary) -> BurstItem {
        match self.try_rewrite(session, product).await {
            Ok(rewrite) => BurstItem {
                id: product.id.clone(),
                title: Some(rewrite.title),
                status: BurstStatus::Optimized,
            },
            Err(err) => {
                tracing::error!(
                    product_id = %product.id,
                    error = %err,
                    "content burst item failed"
                );
                BurstItem {
                    id: product.id.clone(),
                    title: None,
                    status: BurstStatus::Failed,
                }
            }
        }
    }

    async fn try_rewrite(
        &self,
        session: &AdminSession,
        product: &ProductSummary,
    ) -> Result<BurstRewrite, DomainError> {
        let prompt = burst_prompt(product.title.as_str(), product.body_html.as_deref().unwrap_or(""));
        let text = self.model.generate(&prompt).await?;
        let rewrite: BurstRewrite = extract_json(&text)?;

        self.admin
            .update_product(
                session,
                ProductUpdate {
                    id: product.id.clone(),
                    title: Some(rewrite.title.clone()),
                    description_html: Some(rewrite.description_html.clone()),
                },
            )
            .await?;

        self.admin
            .add_tags(session, &product.id, &[BURST_LOCK_TAG.to_string()])
            .await?;

        Ok(rewrite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{MockAdmin, MockModel};
    use crate::domain::foundation::ShopDomain;
    use secrecy::Secret;

    fn session() -> AdminSession {
        AdminSession {
            shop: ShopDomain::new("tenant.myshopify.com").unwrap(),
            access_token: Secret::new("shpat_test".to_string()),
        }
    }

    fn catalog(n: usize) -> Vec<ProductSummary> {
        (0..n)
            .map(|i| ProductSummary {
                id: format!("gid://shopify/Product/{i}"),
                title: format!("Product {i}"),
                body_html: Some("<p>old</p>".to_string()),
                handle: None,
                price: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn rewrites_updates_and_tags_every_product() {
        let admin = Arc::new(MockAdmin::with_products(catalog(3)));
        let model = MockModel::replying(r#"{"title": "New", "descriptionHtml": "<p>x</p>"}"#);
        let handler = ContentBurstHandler::new(Arc::new(model), admin.clone());

        let report = handler.handle(&session()).await.unwrap();

        assert_eq!(report.count, 3);
        assert!(report
            .report
            .iter()
            .all(|item| item.status == BurstStatus::Optimized));
        assert_eq!(admin.product_updates().len(), 3);
        assert_eq!(admin.tag_calls().len(), 3);
        assert!(admin
            .tag_calls()
            .iter()
            .all(|(_, tags)| tags == &vec!["content-locked".to_string()]));
    }

    #[tokio::test]
    async fn empty_catalog_yields_empty_report() {
        let admin = Arc::new(MockAdmin::with_products(Vec::new()));
        let handler =
            ContentBurstHandler::new(Arc::new(MockModel::replying("unused")), admin.clone());

        let report = handler.handle(&session()).await.unwrap();

        assert_eq!(report.count, 0);
        assert!(report.report.is_empty());
        assert!(admin.product_updates().is_empty());
    }

    #[tokio::test]
    async fn model_failure_marks_item_failed_without_update() {
        let admin = Arc::new(MockAdmin::with_products(catalog(2)));
        let handler = ContentBurstHandler::new(Arc::new(MockModel::failing()), admin.clone());

        let report = handler.handle(&session()).await.unwrap();

        assert_eq!(report.count, 2);
        assert!(report
            .report
            .iter()
            .all(|item| item.status == BurstStatus::Failed));
        assert!(admin.product_updates().is_empty());
        assert!(admin.tag_calls().is_empty());
    }
}
