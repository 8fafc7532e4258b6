//! PostgreSQL adapters for the persistence ports.

mod churn_store;
mod shop_store;
mod usage_ledger;

pub use churn_store::PostgresChurnStore;
pub use shop_store::PostgresShopStore;
pub use usage_ledger::PostgresUsageLedger;
