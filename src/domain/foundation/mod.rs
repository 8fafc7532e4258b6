//! Foundation layer - shared value objects and error types.

mod errors;
mod shop;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use shop::ShopDomain;
