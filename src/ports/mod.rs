//! Ports layer - async-trait interfaces between the application core and its
//! external collaborators (persistence, Shopify Admin API, generative model).

mod admin_api;
mod churn_store;
mod generative_model;
mod shop_store;
mod usage_ledger;

pub use admin_api::{
    AdminError, AdminSession, MediaImage, ProductMedia, ProductQuery, ProductSummary,
    ProductUpdate, ShopifyAdmin, UserError,
};
pub use churn_store::ChurnStore;
pub use generative_model::{GenerativeModel, ModelError};
pub use shop_store::ShopStore;
pub use usage_ledger::{ActionStatus, LedgerRecord, UsageEntry, UsageLedger};
