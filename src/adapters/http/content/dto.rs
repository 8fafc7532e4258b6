//! Request shapes for the content endpoints.

use serde::Deserialize;

use crate::domain::content::ContentKind;

/// Body of `POST /api/content/description`.
#[derive(Debug, Deserialize)]
pub struct DescriptionRequest {
    pub product_name: String,
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

impl DescriptionRequest {
    /// Folds the form fields into the single product-details prompt input.
    pub fn product_details(&self) -> String {
        format!(
            "PRODUCT: {}. FEATURES: {}. USER STRATEGY: {}",
            self.product_name,
            self.features.as_deref().unwrap_or("none"),
            self.context.as_deref().unwrap_or("none"),
        )
    }
}

/// Body of `POST /api/content/generate`.
#[derive(Debug, Deserialize)]
pub struct GenerateContentRequest {
    pub content_type: ContentKind,
    #[serde(default)]
    pub song_title: Option<String>,
    #[serde(default)]
    pub product_details: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_request_parses_snake_case_kind() {
        let request: GenerateContentRequest = serde_json::from_str(
            r#"{"content_type": "music_video", "song_title": "Ashes"}"#,
        )
        .unwrap();
        assert_eq!(request.content_type, ContentKind::MusicVideo);
        assert_eq!(request.song_title.as_deref(), Some("Ashes"));
    }

    #[test]
    fn description_request_folds_fields() {
        let request = DescriptionRequest {
            product_name: "Lamp".to_string(),
            features: Some("warm glow".to_string()),
            context: None,
        };
        let details = request.product_details();
        assert!(details.contains("PRODUCT: Lamp"));
        assert!(details.contains("FEATURES: warm glow"));
    }
}
