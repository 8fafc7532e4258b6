//! Churn operations: lockdown checks and uninstall processing.

mod check_lockdown;
mod record_uninstall;

pub use check_lockdown::CheckLockdownHandler;
pub use record_uninstall::HandleUninstallHandler;
