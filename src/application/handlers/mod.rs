//! Application handlers - one struct per operation, ports injected as `Arc`s.

pub mod bulk;
pub mod churn;
pub mod content;
pub mod entitlement;
pub mod media;

#[cfg(test)]
pub(crate) mod test_support {
    //! Hand-rolled port mocks shared by the handler tests.

    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use secrecy::Secret;

    use crate::domain::churn::ChurnRecord;
    use crate::domain::content::BrandProfile;
    use crate::domain::entitlement::ActionCategory;
    use crate::domain::foundation::{DomainError, ShopDomain};
    use crate::ports::{
        AdminError, AdminSession, ChurnStore, GenerativeModel, LedgerRecord, ModelError,
        ProductMedia, ProductQuery, ProductSummary, ProductUpdate, ShopStore, ShopifyAdmin,
        UsageEntry, UsageLedger, UserError,
    };

    fn mock_db_error() -> DomainError {
        DomainError::database("mock store failure")
    }

    // ---- ShopStore ----

    pub struct MockShopStore {
        plan: Option<String>,
        brand: Option<BrandProfile>,
        fail: bool,
        deletes: Mutex<u64>,
    }

    impl MockShopStore {
        pub fn with_plan(plan: &str) -> Self {
            Self {
                plan: Some(plan.to_string()),
                brand: None,
                fail: false,
                deletes: Mutex::new(0),
            }
        }

        pub fn empty() -> Self {
            Self {
                plan: None,
                brand: None,
                fail: false,
                deletes: Mutex::new(0),
            }
        }

        pub fn failing() -> Self {
            Self {
                plan: None,
                brand: None,
                fail: true,
                deletes: Mutex::new(0),
            }
        }

        pub fn deleted_count(&self) -> u64 {
            *self.deletes.lock().unwrap()
        }
    }

    #[async_trait]
    impl ShopStore for MockShopStore {
        async fn plan(&self, _shop: &ShopDomain) -> Result<Option<String>, DomainError> {
            if self.fail {
                return Err(mock_db_error());
            }
            Ok(self.plan.clone())
        }

        async fn access_token(
            &self,
            _shop: &ShopDomain,
        ) -> Result<Option<Secret<String>>, DomainError> {
            if self.fail {
                return Err(mock_db_error());
            }
            Ok(self
                .plan
                .as_ref()
                .map(|_| Secret::new("shpat_mock".to_string())))
        }

        async fn brand_profile(
            &self,
            _shop: &ShopDomain,
        ) -> Result<Option<BrandProfile>, DomainError> {
            if self.fail {
                return Err(mock_db_error());
            }
            Ok(self.brand.clone())
        }

        async fn delete_sessions(&self, _shop: &ShopDomain) -> Result<u64, DomainError> {
            if self.fail {
                return Err(mock_db_error());
            }
            *self.deletes.lock().unwrap() += 1;
            Ok(u64::from(self.plan.is_some()))
        }
    }

    // ---- UsageLedger ----

    #[derive(Default)]
    pub struct MockLedger {
        descriptions: u32,
        ads: u32,
        music_videos: u32,
        total: Option<u32>,
        fail: bool,
        entries: Mutex<Vec<UsageEntry>>,
        applied: Mutex<Vec<String>>,
    }

    impl MockLedger {
        pub fn with_count(category: ActionCategory, count: u32) -> Self {
            Self::default().and_count(category, count)
        }

        pub fn and_count(mut self, category: ActionCategory, count: u32) -> Self {
            match category {
                ActionCategory::Description => self.descriptions = count,
                ActionCategory::Ad => self.ads = count,
                ActionCategory::MusicVideo => self.music_videos = count,
            }
            self
        }

        pub fn with_total(total: u32) -> Self {
            Self {
                total: Some(total),
                ..Self::default()
            }
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        pub fn entries(&self) -> Vec<UsageEntry> {
            self.entries.lock().unwrap().clone()
        }

        pub fn applied_products(&self) -> Vec<String> {
            self.applied.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl UsageLedger for MockLedger {
        async fn record(&self, entry: UsageEntry) -> Result<(), DomainError> {
            if self.fail {
                return Err(mock_db_error());
            }
            self.entries.lock().unwrap().push(entry);
            Ok(())
        }

        async fn count_since(
            &self,
            _shop: &ShopDomain,
            category: ActionCategory,
            _since: DateTime<Utc>,
        ) -> Result<u32, DomainError> {
            if self.fail {
                return Err(mock_db_error());
            }
            Ok(match category {
                ActionCategory::Description => self.descriptions,
                ActionCategory::Ad => self.ads,
                ActionCategory::MusicVideo => self.music_videos,
            })
        }

        async fn count_all_since(
            &self,
            _shop: &ShopDomain,
            _since: DateTime<Utc>,
        ) -> Result<u32, DomainError> {
            if self.fail {
                return Err(mock_db_error());
            }
            Ok(self
                .total
                .unwrap_or(self.descriptions + self.ads + self.music_videos))
        }

        async fn recent(
            &self,
            _shop: &ShopDomain,
            _limit: u32,
        ) -> Result<Vec<LedgerRecord>, DomainError> {
            if self.fail {
                return Err(mock_db_error());
            }
            Ok(Vec::new())
        }

        async fn mark_applied(
            &self,
            _shop: &ShopDomain,
            product_id: &str,
        ) -> Result<(), DomainError> {
            if self.fail {
                return Err(mock_db_error());
            }
            self.applied.lock().unwrap().push(product_id.to_string());
            Ok(())
        }
    }

    // ---- ChurnStore ----

    pub struct MockChurnStore {
        record: Mutex<Option<ChurnRecord>>,
        fail: bool,
        uninstalls: Mutex<u32>,
    }

    impl MockChurnStore {
        pub fn empty() -> Self {
            Self {
                record: Mutex::new(None),
                fail: false,
                uninstalls: Mutex::new(0),
            }
        }

        pub fn with_record(record: ChurnRecord) -> Self {
            Self {
                record: Mutex::new(Some(record)),
                fail: false,
                uninstalls: Mutex::new(0),
            }
        }

        pub fn failing() -> Self {
            Self {
                record: Mutex::new(None),
                fail: true,
                uninstalls: Mutex::new(0),
            }
        }

        pub fn uninstall_count(&self) -> u32 {
            *self.uninstalls.lock().unwrap()
        }

        pub fn current_record(&self) -> Option<ChurnRecord> {
            self.record.lock().unwrap().clone()
        }

        pub fn last_uninstall_at(&self) -> Option<DateTime<Utc>> {
            self.record
                .lock()
                .unwrap()
                .as_ref()
                .and_then(|r| r.last_uninstalled_at)
        }
    }

    #[async_trait]
    impl ChurnStore for MockChurnStore {
        async fn find(&self, _shop: &ShopDomain) -> Result<Option<ChurnRecord>, DomainError> {
            if self.fail {
                return Err(mock_db_error());
            }
            Ok(self.record.lock().unwrap().clone())
        }

        async fn record_uninstall(
            &self,
            shop: &ShopDomain,
            at: DateTime<Utc>,
        ) -> Result<(), DomainError> {
            if self.fail {
                return Err(mock_db_error());
            }
            *self.record.lock().unwrap() = Some(ChurnRecord::uninstalled(shop.clone(), at));
            *self.uninstalls.lock().unwrap() += 1;
            Ok(())
        }
    }

    // ---- GenerativeModel ----

    pub struct MockModel {
        reply: Option<String>,
    }

    impl MockModel {
        pub fn replying(text: &str) -> Self {
            Self {
                reply: Some(text.to_string()),
            }
        }

        pub fn failing() -> Self {
            Self { reply: None }
        }
    }

    #[async_trait]
    impl GenerativeModel for MockModel {
        async fn generate(&self, _prompt: &str) -> Result<String, ModelError> {
            match &self.reply {
                Some(text) => Ok(text.clone()),
                None => Err(ModelError::Network("mock model offline".to_string())),
            }
        }

        fn model_name(&self) -> &str {
            "mock-model"
        }
    }

    // ---- ShopifyAdmin ----

    #[derive(Default)]
    pub struct MockAdmin {
        products: Vec<ProductSummary>,
        media: Vec<ProductMedia>,
        reject_updates: Option<String>,
        queries: Mutex<Vec<ProductQuery>>,
        updates: Mutex<Vec<ProductUpdate>>,
        alts: Mutex<Vec<(String, String)>>,
        tags: Mutex<Vec<(String, Vec<String>)>>,
    }

    impl MockAdmin {
        pub fn with_products(products: Vec<ProductSummary>) -> Self {
            Self {
                products,
                ..Self::default()
            }
        }

        pub fn with_media(media: Vec<ProductMedia>) -> Self {
            Self {
                media,
                ..Self::default()
            }
        }

        pub fn rejecting_updates(message: &str) -> Self {
            Self {
                reject_updates: Some(message.to_string()),
                ..Self::default()
            }
        }

        pub fn last_product_query(&self) -> Option<ProductQuery> {
            self.queries.lock().unwrap().last().cloned()
        }

        pub fn product_updates(&self) -> Vec<ProductUpdate> {
            self.updates.lock().unwrap().clone()
        }

        pub fn alt_updates(&self) -> Vec<(String, String)> {
            self.alts.lock().unwrap().clone()
        }

        pub fn tag_calls(&self) -> Vec<(String, Vec<String>)> {
            self.tags.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ShopifyAdmin for MockAdmin {
        async fn fetch_products(
            &self,
            _session: &AdminSession,
            query: ProductQuery,
        ) -> Result<Vec<ProductSummary>, AdminError> {
            self.queries.lock().unwrap().push(query);
            Ok(self.products.clone())
        }

        async fn fetch_media_batch(
            &self,
            _session: &AdminSession,
            query: ProductQuery,
        ) -> Result<Vec<ProductMedia>, AdminError> {
            self.queries.lock().unwrap().push(query);
            Ok(self.media.clone())
        }

        async fn update_product(
            &self,
            _session: &AdminSession,
            update: ProductUpdate,
        ) -> Result<(), AdminError> {
            if let Some(message) = &self.reject_updates {
                return Err(AdminError::UserErrors(vec![UserError {
                    field: Some(vec!["title".to_string()]),
                    message: message.clone(),
                }]));
            }
            self.updates.lock().unwrap().push(update);
            Ok(())
        }

        async fn update_file_alt(
            &self,
            _session: &AdminSession,
            file_id: &str,
            alt: &str,
        ) -> Result<(), AdminError> {
            self.alts
                .lock()
                .unwrap()
                .push((file_id.to_string(), alt.to_string()));
            Ok(())
        }

        async fn add_tags(
            &self,
            _session: &AdminSession,
            resource_id: &str,
            tags: &[String],
        ) -> Result<(), AdminError> {
            self.tags
                .lock()
                .unwrap()
                .push((resource_id.to_string(), tags.to_vec()));
            Ok(())
        }
    }
}
