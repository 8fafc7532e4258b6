//! Lock-state derivation.

use chrono::{DateTime, Months, Utc};

use super::ChurnRecord;

/// Reinstall cooldown, in calendar months (not a fixed day count).
pub const CHURN_COOLDOWN_MONTHS: u32 = 6;

/// Derived access state for a shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unlocked,
    Locked,
}

impl LockState {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockState::Locked)
    }
}

/// Derives the lock state from a churn record at time `now`.
///
/// Locked iff `last_uninstalled_at` is strictly more recent than `now` minus
/// six calendar months; an uninstall exactly six months ago is Unlocked
/// (boundary exclusive on the locked side). No record, or a record without an
/// uninstall timestamp, is Unlocked.
pub fn lock_state(record: Option<&ChurnRecord>, now: DateTime<Utc>) -> LockState {
    let Some(uninstalled_at) = record.and_then(|r| r.last_uninstalled_at) else {
        return LockState::Unlocked;
    };

    let cutoff = now
        .checked_sub_months(Months::new(CHURN_COOLDOWN_MONTHS))
        .unwrap_or(now);

    if uninstalled_at > cutoff {
        LockState::Locked
    } else {
        LockState::Unlocked
    }
}
