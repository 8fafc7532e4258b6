//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Values are read with the `PHOENIX_` prefix
//! and nested sections use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use phoenix_flow::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod database;
mod error;
mod server;
mod shopify;

pub use ai::AiConfig;
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use shopify::ShopifyConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (PostgreSQL connection)
    pub database: DatabaseConfig,

    /// Generative model configuration (Gemini)
    pub ai: AiConfig,

    /// Shopify app credentials and platform settings
    pub shopify: ShopifyConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads a `.env` file if present (development)
    /// 2. Reads environment variables with `PHOENIX` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `PHOENIX__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PHOENIX__DATABASE__URL=...` -> `database.url = ...`
    /// - `PHOENIX__AI__GEMINI_API_KEY=...` -> `ai.gemini_api_key = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PHOENIX")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ai.validate()?;
        self.shopify.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Env vars are process-global; serialize these tests.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn set_minimal_env() {
        env::set_var("PHOENIX__DATABASE__URL", "postgresql://test@localhost/test");
        env::set_var("PHOENIX__AI__GEMINI_API_KEY", "AIzaTest");
        env::set_var("PHOENIX__SHOPIFY__API_KEY", "app-key");
        env::set_var("PHOENIX__SHOPIFY__API_SECRET", "app-secret");
        env::set_var("PHOENIX__SHOPIFY__WEBHOOK_SECRET", "wh-secret");
    }

    fn clear_env() {
        env::remove_var("PHOENIX__DATABASE__URL");
        env::remove_var("PHOENIX__AI__GEMINI_API_KEY");
        env::remove_var("PHOENIX__SHOPIFY__API_KEY");
        env::remove_var("PHOENIX__SHOPIFY__API_SECRET");
        env::remove_var("PHOENIX__SHOPIFY__WEBHOOK_SECRET");
        env::remove_var("PHOENIX__SERVER__PORT");
    }

    #[test]
    fn load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.database.url, "postgresql://test@localhost/test");
        assert_eq!(config.shopify.api_key, "app-key");
    }

    #[test]
    fn loaded_config_validates() {
        let _guard = ENV_MUTEX.lock().unwrap();
        set_minimal_env();
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.validate().is_ok());
    }
}
