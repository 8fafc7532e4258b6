//! Entitlement operations: plan resolution, action gating, usage summaries.

mod check_action;
mod resolve_plan;
mod usage_summary;

pub use check_action::CheckActionHandler;
pub use resolve_plan::PlanResolver;
pub use usage_summary::{CategoryUsage, GetUsageSummaryHandler, UsageSummary};
