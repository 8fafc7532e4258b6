//! Shop domain value object - the tenant key for all usage and entitlement data.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// A merchant store's myshopify domain, normalized to lowercase.
///
/// Every persisted record (sessions, usage ledger, churn) is keyed by this
/// value; it is the unit of isolation for the whole system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShopDomain(String);

impl ShopDomain {
    /// Creates a ShopDomain, normalizing case and stripping any scheme.
    ///
    /// Accepts `my-shop.myshopify.com` or `https://my-shop.myshopify.com`.
    pub fn new(domain: impl Into<String>) -> Result<Self, ValidationError> {
        let domain = domain.into();
        let trimmed = domain
            .trim()
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/')
            .to_lowercase();

        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("shop_domain"));
        }
        if !trimmed.contains('.') || trimmed.contains('/') || trimmed.contains(' ') {
            return Err(ValidationError::invalid_format(
                "shop_domain",
                "expected a hostname like my-shop.myshopify.com",
            ));
        }

        Ok(Self(trimmed))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShopDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
