//! Generative Model Port - interface to the text-generation service.
//!
//! Abstracts the Gemini API behind a provider-agnostic trait so handlers can
//! be exercised against canned models in tests. The implementation owns a
//! connection-pooled HTTP client injected at construction time; connection
//! lifecycle belongs to the process entry point.

use async_trait::async_trait;
use thiserror::Error;

/// Errors from the generative model service.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model API rejected credentials")]
    Unauthorized,

    #[error("Model API rate limit exceeded")]
    RateLimited,

    /// The service answered but its payload was not the documented shape,
    /// or the completion was blocked/empty.
    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    #[error("Model request failed: {0}")]
    Network(String),
}

impl From<ModelError> for crate::domain::foundation::DomainError {
    fn from(err: ModelError) -> Self {
        use crate::domain::foundation::{DomainError, ErrorCode};
        let code = match err {
            ModelError::Unauthorized => ErrorCode::Unauthorized,
            _ => ErrorCode::ModelError,
        };
        DomainError::new(code, err.to_string())
    }
}

/// Port for text completion against the generative model service.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Generates a completion for the prompt.
    ///
    /// Returns the raw completion text; structured callers run it through
    /// the content extract module afterwards.
    async fn generate(&self, prompt: &str) -> Result<String, ModelError>;

    /// Model identifier recorded alongside ledger entries.
    fn model_name(&self) -> &str;
}
