//! Pay-as-you-go overage pricing.

use serde::{Deserialize, Serialize};

use super::{ActionCategory, TierLimits};

/// Usage beyond a plan's included ceiling, billed per unit.
///
/// Cost is tracked in integer cents to keep billing arithmetic exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Overage {
    /// Units beyond the included ceiling.
    pub units: u32,
    /// Total overage cost in cents.
    pub cost_cents: u64,
}

/// Per-unit overage rate in cents for a category.
///
/// Fixed product constants: descriptions $0.10, ads $1.00, music videos $0.50.
pub fn rate_cents(category: ActionCategory) -> u64 {
    match category {
        ActionCategory::Description => 10,
        ActionCategory::Ad => 100,
        ActionCategory::MusicVideo => 50,
    }
}

/// Computes overage for a category given usage as recorded so far.
///
/// `units = max(0, usage - ceiling)`; zero for unlimited ceilings.
pub fn calculate_overage(
    limits: &TierLimits,
    category: ActionCategory,
    current_usage: u32,
) -> Overage {
    match limits.ceiling(category) {
        None => Overage::default(),
        Some(ceiling) => {
            let units = current_usage.saturating_sub(ceiling);
            Overage {
                units,
                cost_cents: u64::from(units) * rate_cents(category),
            }
        }
    }
}
