//! Usage Ledger Port - append-only record of completed actions.
//!
//! One row per completed action, written exactly once, never updated or
//! deleted. Monthly aggregation is computed on read. A failed count MUST
//! propagate (fail closed): silently returning zero would grant unlimited
//! access during a backing-store outage.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entitlement::ActionCategory;
use crate::domain::foundation::{DomainError, ShopDomain};

/// A completed action to append to the ledger.
#[derive(Debug, Clone)]
pub struct UsageEntry {
    pub shop: ShopDomain,
    pub category: ActionCategory,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    /// Serialized generated content, for the history page.
    pub content: serde_json::Value,
    /// Model that produced the content.
    pub model: String,
    pub status: ActionStatus,
}

/// Outcome recorded for an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Success,
    Failed,
    Applied,
}

impl ActionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Success => "success",
            ActionStatus::Failed => "failed",
            ActionStatus::Applied => "applied",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(ActionStatus::Success),
            "failed" => Some(ActionStatus::Failed),
            "applied" => Some(ActionStatus::Applied),
            _ => None,
        }
    }
}

/// A persisted ledger row, read back for the history page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerRecord {
    pub shop: ShopDomain,
    pub category: ActionCategory,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub content: serde_json::Value,
    pub model: String,
    pub status: ActionStatus,
    pub occurred_at: DateTime<Utc>,
}

/// Port for the append-only usage ledger.
#[async_trait]
pub trait UsageLedger: Send + Sync {
    /// Appends one completed action. Called exactly once per action.
    async fn record(&self, entry: UsageEntry) -> Result<(), DomainError>;

    /// Counts actions of one category for a shop since `since` (inclusive).
    async fn count_since(
        &self,
        shop: &ShopDomain,
        category: ActionCategory,
        since: DateTime<Utc>,
    ) -> Result<u32, DomainError>;

    /// Counts actions of all categories for a shop since `since` (inclusive).
    async fn count_all_since(
        &self,
        shop: &ShopDomain,
        since: DateTime<Utc>,
    ) -> Result<u32, DomainError>;

    /// Most recent ledger rows for a shop, newest first.
    async fn recent(&self, shop: &ShopDomain, limit: u32) -> Result<Vec<LedgerRecord>, DomainError>;

    /// Marks this shop's successful rows for a product as applied to Shopify.
    ///
    /// The only sanctioned mutation: a status flip on apply, the row itself
    /// stays append-only for counting purposes.
    async fn mark_applied(&self, shop: &ShopDomain, product_id: &str) -> Result<(), DomainError>;
}
