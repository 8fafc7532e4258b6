//! Structured output of the bulk analyzer.

use serde::{Deserialize, Serialize};

/// Per-product SEO analysis parsed from model output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductAnalysis {
    pub optimized_title: String,
    pub optimized_html_description: String,
    /// Serialized JSON-LD schema block, injected into the description on apply.
    #[serde(default)]
    pub json_ld_schema: String,
    #[serde(default)]
    pub seo_score: f32,
    #[serde(default)]
    pub missing_trust_signals: Vec<String>,
}

/// Title/description rewrite parsed from the content-burst model output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstRewrite {
    pub title: String,
    #[serde(rename = "descriptionHtml")]
    pub description_html: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::content::extract_json;

    #[test]
    fn parses_full_analysis() {
        let text = r#"```json
        {
          "optimized_title": "Elite Lamp",
          "optimized_html_description": "<h2>Elite Lamp</h2>",
          "json_ld_schema": "{}",
          "seo_score": 9.1,
          "missing_trust_signals": ["reviews"]
        }
        ```"#;
        let analysis: ProductAnalysis = extract_json(text).unwrap();
        assert_eq!(analysis.optimized_title, "Elite Lamp");
        assert_eq!(analysis.missing_trust_signals, vec!["reviews"]);
    }

    #[test]
    fn optional_fields_default() {
        let text = r#"{"optimized_title": "T", "optimized_html_description": "<p>D</p>"}"#;
        let analysis: ProductAnalysis = extract_json(text).unwrap();
        assert_eq!(analysis.seo_score, 0.0);
        assert!(analysis.missing_trust_signals.is_empty());
    }

    #[test]
    fn burst_rewrite_uses_camel_case_description() {
        let text = r#"{"title": "New", "descriptionHtml": "<p>Short.</p>"}"#;
        let rewrite: BurstRewrite = extract_json(text).unwrap();
        assert_eq!(rewrite.description_html, "<p>Short.</p>");
    }
}
