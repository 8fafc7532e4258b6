//! Extract-and-validate step for free-text model output.
//!
//! The generative model returns prose with no format guarantee: structured
//! payloads are frequently wrapped in markdown code fences, and sometimes the
//! model lectures instead of answering. All structured parsing of model text
//! funnels through this module so that malformed output is a declared failure
//! mode rather than string surgery scattered across call sites.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Failure to extract a structured payload from model text.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The text did not parse as the expected shape. Carries a truncated
    /// sample of the offending output for diagnostics.
    #[error("Malformed model response: {reason} (sample: {sample:?})")]
    MalformedResponse { reason: String, sample: String },
}

impl ExtractError {
    fn malformed(reason: impl Into<String>, text: &str) -> Self {
        ExtractError::MalformedResponse {
            reason: reason.into(),
            sample: text.chars().take(120).collect(),
        }
    }
}

impl From<ExtractError> for crate::domain::foundation::DomainError {
    fn from(err: ExtractError) -> Self {
        use crate::domain::foundation::{DomainError, ErrorCode};
        DomainError::new(ErrorCode::MalformedResponse, err.to_string())
    }
}

/// Strips markdown code-fence markers (```json, ```html, bare ```) and trims.
///
/// The model is instructed to return raw payloads, but wraps them in fences
/// often enough that every caller must tolerate both.
pub fn strip_code_fences(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for line in text.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            // Drop the fence line itself, including any language tag.
            continue;
        }
        cleaned.push_str(line);
        cleaned.push('\n');
    }
    // Inline fences (no surrounding newline) still need removal.
    let cleaned = cleaned
        .replace("```json", "")
        .replace("```html", "")
        .replace("```", "");
    cleaned.trim().to_string()
}

/// Extracts a JSON value of type `T` from raw model text.
///
/// Fences are stripped first; if the remainder still fails to parse, the text
/// is scanned for the outermost JSON array/object as a last resort (models
/// occasionally prepend a sentence despite instructions).
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Result<T, ExtractError> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(ExtractError::malformed("empty response", text));
    }

    match serde_json::from_str(&cleaned) {
        Ok(value) => Ok(value),
        Err(first_err) => {
            let Some(candidate) = outermost_json(&cleaned) else {
                return Err(ExtractError::malformed(first_err.to_string(), text));
            };
            serde_json::from_str(candidate)
                .map_err(|e| ExtractError::malformed(e.to_string(), text))
        }
    }
}

/// Extracts an HTML payload: fences stripped, must be non-empty.
pub fn extract_html(text: &str) -> Result<String, ExtractError> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(ExtractError::malformed("empty response", text));
    }
    Ok(cleaned)
}

/// Finds the outermost `[...]` or `{...}` span in the text.
fn outermost_json(text: &str) -> Option<&str> {
    let open = text.find(['[', '{'])?;
    let close_char = if text.as_bytes()[open] == b'[' { ']' } else { '}' };
    let close = text.rfind(close_char)?;
    if close > open {
        Some(&text[open..=close])
    } else {
        None
    }
}
