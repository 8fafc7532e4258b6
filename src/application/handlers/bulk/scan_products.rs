//! ScanProductsHandler - the triage step of the bulk pipeline.
//!
//! Pulls a five-item batch of active products for the merchant to review
//! before spending any model budget on them. Read-only; nothing is gated or
//! recorded here.

use std::sync::Arc;

use crate::domain::foundation::DomainError;
use crate::ports::{AdminSession, ProductQuery, ProductSummary, ShopifyAdmin};

const SCAN_BATCH: u32 = 5;

pub struct ScanProductsHandler {
    admin: Arc<dyn ShopifyAdmin>,
}

impl ScanProductsHandler {
    pub fn new(admin: Arc<dyn ShopifyAdmin>) -> Self {
        Self { admin }
    }

    pub async fn handle(&self, session: &AdminSession) -> Result<Vec<ProductSummary>, DomainError> {
        let products = self
            .admin
            .fetch_products(
                session,
                ProductQuery {
                    first: SCAN_BATCH,
                    search: Some("status:active".to_string()),
                    reverse: true,
                },
            )
            .await?;
        Ok(products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::MockAdmin;
    use crate::domain::foundation::ShopDomain;
    use secrecy::Secret;

    fn session() -> AdminSession {
        AdminSession {
            shop: ShopDomain::new("tenant.myshopify.com").unwrap(),
            access_token: Secret::new("shpat_test".to_string()),
        }
    }

    #[tokio::test]
    async fn returns_the_fetched_batch() {
        let admin = Arc::new(MockAdmin::with_products(vec![ProductSummary {
            id: "gid://shopify/Product/1".to_string(),
            title: "Lamp".to_string(),
            body_html: None,
            handle: None,
            price: Some("19.99".to_string()),
        }]));
        let handler = ScanProductsHandler::new(admin.clone());

        let products = handler.handle(&session()).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Lamp");
        let query = admin.last_product_query().unwrap();
        assert_eq!(query.first, 5);
        assert_eq!(query.search.as_deref(), Some("status:active"));
        assert!(query.reverse);
    }
}
