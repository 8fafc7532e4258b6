//! OptimizeMediaHandler - SEO alt text over a small product batch.
//!
//! Fetches up to five products that still carry unoptimized media, then walks
//! them one at a time: generate an alt text for the product, stamp it on every
//! image, and tag the product so the next pass skips it. Alt text degrades to
//! a hard-coded fallback when the model misbehaves; a broken model never
//! blocks the pass.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::content::{alt_text_fallback, alt_text_prompt, BrandProfile};
use crate::domain::foundation::{DomainError, ShopDomain};
use crate::ports::{AdminSession, GenerativeModel, ProductQuery, ShopStore, ShopifyAdmin};

const MEDIA_LOCK_TAG: &str = "visual-locked";
const MEDIA_BATCH: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaStatus {
    SeoComplete,
    Failed,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaItem {
    pub title: String,
    pub images_updated: usize,
    pub status: MediaStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaReport {
    pub report: Vec<MediaItem>,
}

pub struct OptimizeMediaHandler {
    model: Arc<dyn GenerativeModel>,
    admin: Arc<dyn ShopifyAdmin>,
    shop_store: Arc<dyn ShopStore>,
}

impl OptimizeMediaHandler {
    pub fn new(
        model: Arc<dyn GenerativeModel>,
        admin: Arc<dyn ShopifyAdmin>,
        shop_store: Arc<dyn ShopStore>,
    ) -> Self {
        Self {
            model,
            admin,
            shop_store,
        }
    }

    pub async fn handle(
        &self,
        shop: &ShopDomain,
        session: &AdminSession,
    ) -> Result<MediaReport, DomainError> {
        let products = self
            .admin
            .fetch_media_batch(
                session,
                ProductQuery {
                    first: MEDIA_BATCH,
                    search: Some(format!("-tag:{MEDIA_LOCK_TAG}")),
                    reverse: false,
                },
            )
            .await?;

        let brand = self
            .shop_store
            .brand_profile(shop)
            .await?
            .unwrap_or_default();

        let mut report = Vec::with_capacity(products.len());

        // One product at a time. The platform rate-limits mutations and each
        // product can carry several images.
        for product in products {
            let alt = self.alt_text_for(&product.title, &brand).await;
            let mut updated = 0usize;
            let mut failed = false;

            for image in &product.images {
                match self.admin.update_file_alt(session, &image.id, &alt).await {
                    Ok(()) => updated += 1,
                    Err(err) => {
                        tracing::error!(
                            product_id = %product.id,
                            file_id = %image.id,
                            error = %err,
                            "alt text update failed"
                        );
                        failed = true;
                    }
                }
            }

            if !failed {
                if let Err(err) = self
                    .admin
                    .add_tags(session, &product.id, &[MEDIA_LOCK_TAG.to_string()])
                    .await
                {
                    tracing::error!(product_id = %product.id, error = %err, "lock tag failed");
                    failed = true;
                }
            }

            report.push(MediaItem {
                title: product.title,
                images_updated: updated,
                status: if failed {
                    MediaStatus::Failed
                } else {
                    MediaStatus::SeoComplete
                },
            });
        }

        Ok(MediaReport { report })
    }

    /// Alt text from the model, or the fallback string when generation fails
    /// or comes back empty.
    async fn alt_text_for(&self, product_title: &str, brand: &BrandProfile) -> String {
        match self.model.generate(&alt_text_prompt(product_title, brand)).await {
            Ok(text) => {
                let text = text.trim();
                if text.is_empty() {
                    alt_text_fallback(product_title)
                } else {
                    text.to_string()
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "alt text generation failed, using fallback");
                alt_text_fallback(product_title)
            }
        }
    }
}
