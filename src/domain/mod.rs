//! Domain layer - pure policy and value objects, no I/O.

pub mod churn;
pub mod content;
pub mod entitlement;
pub mod foundation;
