//! Shopify platform configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Shopify app credentials and platform settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ShopifyConfig {
    /// Public app API key (client id)
    pub api_key: String,

    /// App API secret - signs embedded-app session tokens (HS256)
    pub api_secret: Secret<String>,

    /// Webhook signing secret - HMAC-SHA256 over the raw request body.
    /// Usually equal to the API secret for app-managed webhooks.
    pub webhook_secret: Secret<String>,

    /// Admin GraphQL API version
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Comma-separated shop domains granted enterprise access unconditionally
    pub admin_shops: Option<String>,
}

impl ShopifyConfig {
    /// Shops on the admin allowlist bypass plan resolution.
    pub fn admin_shop_list(&self) -> Vec<String> {
        self.admin_shops
            .as_ref()
            .map(|s| {
                s.split(',')
                    .map(|s| s.trim().to_lowercase())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate Shopify configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.is_empty() {
            return Err(ValidationError::MissingRequired("SHOPIFY_API_KEY"));
        }
        if self.api_secret.expose_secret().is_empty() {
            return Err(ValidationError::EmptyApiSecret);
        }
        if self.webhook_secret.expose_secret().is_empty() {
            return Err(ValidationError::EmptyWebhookSecret);
        }
        Ok(())
    }
}

fn default_api_version() -> String {
    "2024-10".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> ShopifyConfig {
        ShopifyConfig {
            api_key: "key".to_string(),
            api_secret: Secret::new("secret".to_string()),
            webhook_secret: Secret::new("whsecret".to_string()),
            api_version: default_api_version(),
            admin_shops: None,
        }
    }

    #[test]
    fn validation_accepts_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validation_rejects_empty_secret() {
        let mut config = valid_config();
        config.api_secret = Secret::new(String::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn admin_shops_parse_trimmed_and_lowercased() {
        let mut config = valid_config();
        config.admin_shops = Some("Shop-A.myshopify.com, shop-b.myshopify.com ,".to_string());
        let shops = config.admin_shop_list();
        assert_eq!(
            shops,
            vec!["shop-a.myshopify.com", "shop-b.myshopify.com"]
        );
    }

    #[test]
    fn admin_shops_default_empty() {
        assert!(valid_config().admin_shop_list().is_empty());
    }
}
