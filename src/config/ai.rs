//! Generative model configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Gemini API configuration.
///
/// The HTTP client built from this config is created once at process startup
/// and shared; its lifecycle is owned by `main`, never a module-level
/// singleton.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Secret<String>,

    /// Model identifier (e.g. "gemini-1.5-pro", "gemini-1.5-flash")
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL for the Generative Language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.gemini_api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }
        if self.model.is_empty() {
            return Err(ValidationError::EmptyModelName);
        }
        Ok(())
    }
}

fn default_model() -> String {
    "gemini-1.5-pro".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    60
}
