//! Plan tier definitions.
//!
//! Represents the subscription tiers a shop can be on.

use serde::{Deserialize, Serialize};

/// Subscription plan tier.
///
/// Determines feature access, monthly usage ceilings, and scan batch size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// Free tier - description generator with a small monthly allowance.
    Free,

    /// Starter - $29/month, adds bulk analyzer and product ads.
    Starter,

    /// Professional - $79/month, adds music videos and song showcases.
    Professional,

    /// Enterprise - $199/month, everything unlimited.
    Enterprise,
}

impl PlanTier {
    /// Parses a plan identifier leniently.
    ///
    /// Unknown identifiers yield `None`, which callers must treat as absent
    /// entitlement - deny gated operations, never error.
    pub fn parse(plan: &str) -> Option<Self> {
        match plan.trim().to_lowercase().as_str() {
            "free" => Some(PlanTier::Free),
            "starter" => Some(PlanTier::Starter),
            "professional" => Some(PlanTier::Professional),
            "enterprise" => Some(PlanTier::Enterprise),
            _ => None,
        }
    }

    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, PlanTier::Free)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            PlanTier::Free => "Free Tier",
            PlanTier::Starter => "Starter",
            PlanTier::Professional => "Professional",
            PlanTier::Enterprise => "Enterprise",
        }
    }
}

impl std::fmt::Display for PlanTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
