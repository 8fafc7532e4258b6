//! Shopify platform adapters: Admin GraphQL client and webhook verification.

mod admin_client;
mod webhook;

pub use admin_client::AdminGraphqlClient;
pub use webhook::{ShopifyWebhookVerifier, WebhookError};
