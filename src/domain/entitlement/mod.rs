//! Entitlement domain - plan tiers, feature gates, usage ceilings, overages.
//!
//! Everything here is a pure function of the static tier catalog plus freshly
//! read counters; no mutable state lives in this module.

mod feature;
mod overage;
mod tier;
mod tier_limits;
mod usage;

pub use feature::Feature;
pub use overage::{calculate_overage, rate_cents, Overage};
pub use tier::PlanTier;
pub use tier_limits::TierLimits;
pub use usage::{
    next_reset_after, start_of_current_month, start_of_month_at, ActionCategory, MonthlyUsage,
};

use serde::{Deserialize, Serialize};

/// Outcome of an entitlement check: a normal business result, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum ActionDecision {
    Allowed,
    Denied { reason: String },
}

impl ActionDecision {
    pub fn denied(reason: impl Into<String>) -> Self {
        ActionDecision::Denied {
            reason: reason.into(),
        }
    }

    pub fn is_allowed(&self) -> bool {
        matches!(self, ActionDecision::Allowed)
    }
}
