//! Shop Store Port - per-shop session, plan, and brand profile reads.

use async_trait::async_trait;
use secrecy::Secret;

use crate::domain::content::BrandProfile;
use crate::domain::foundation::{DomainError, ShopDomain};

/// Port over per-shop persisted state: the install session (plan + Admin API
/// access token) and the onboarding brand profile.
#[async_trait]
pub trait ShopStore: Send + Sync {
    /// The shop's subscribed plan identifier, as persisted (raw string).
    /// `None` when the shop has no session row or no plan column set.
    async fn plan(&self, shop: &ShopDomain) -> Result<Option<String>, DomainError>;

    /// The shop's Admin API access token, if a session exists.
    async fn access_token(&self, shop: &ShopDomain)
        -> Result<Option<Secret<String>>, DomainError>;

    /// Brand profile configured during onboarding.
    async fn brand_profile(&self, shop: &ShopDomain)
        -> Result<Option<BrandProfile>, DomainError>;

    /// Wipes the shop's session rows (uninstall cleanup). Returns rows removed.
    async fn delete_sessions(&self, shop: &ShopDomain) -> Result<u64, DomainError>;
}
