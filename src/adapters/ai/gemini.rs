//! Gemini implementation of the GenerativeModel port.
//!
//! Calls `models/{model}:generateContent` with every safety category set to
//! BLOCK_NONE; the prompts already constrain output shape and the merchant
//! owns the content. The HTTP client is injected by process wiring so all
//! adapters share one connection pool.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::AiConfig;
use crate::ports::{GenerativeModel, ModelError};

pub struct GeminiClient {
    client: Client,
    config: AiConfig,
}

impl GeminiClient {
    pub fn new(client: Client, config: AiConfig) -> Self {
        Self { client, config }
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url, self.config.model
        )
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "safetySettings")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct SafetySetting {
    category: &'static str,
    threshold: &'static str,
}

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

fn safety_settings() -> Vec<SafetySetting> {
    SAFETY_CATEGORIES
        .iter()
        .map(|category| SafetySetting {
            category,
            threshold: "BLOCK_NONE",
        })
        .collect()
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Pulls the first candidate's text out of the response envelope.
fn extract_text(response: GenerateContentResponse) -> Result<String, ModelError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .map(|part| part.text);

    match text {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(ModelError::InvalidResponse(
            "Model returned empty text".to_string(),
        )),
        None => Err(ModelError::InvalidResponse(
            "Response carried no candidates".to_string(),
        )),
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ModelError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            safety_settings: safety_settings(),
        };

        let response = self
            .client
            .post(self.generate_url())
            .query(&[("key", self.config.gemini_api_key.expose_secret())])
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Network(format!("Request timed out: {e}"))
                } else {
                    ModelError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ModelError::Unauthorized);
        }
        if status.as_u16() == 429 {
            return Err(ModelError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ModelError::InvalidResponse(format!(
                "Unexpected status {status}: {body}"
            )));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ModelError::InvalidResponse(e.to_string()))?;

        extract_text(parsed)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
