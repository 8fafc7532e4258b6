//! Anti-churn lockout domain.
//!
//! A shop that uninstalls the app cannot regain trial-level access within a
//! fixed cooldown window. Lock state is derived from the persisted record at
//! each read; elapsed time is the only path back to Unlocked.

mod lock;
mod record;

pub use lock::{lock_state, LockState, CHURN_COOLDOWN_MONTHS};
pub use record::ChurnRecord;
