//! Prompt builders for the content engine.
//!
//! One builder per content kind. Each prompt instructs the model to return a
//! bare payload (raw HTML or a JSON array); the extract module handles the
//! cases where it wraps the payload in fences anyway.

use serde::{Deserialize, Serialize};

use super::html::{decode_html_entities, strip_html_tags};
use super::BrandProfile;
use crate::domain::entitlement::ActionCategory;

/// Discriminator for the multi-purpose content generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    MusicVideo,
    ProductAd,
    SongShowcase,
    ProductDescription,
    General,
}

impl ContentKind {
    /// The usage category this kind bills against.
    pub fn action_category(&self) -> ActionCategory {
        match self {
            ContentKind::MusicVideo => ActionCategory::MusicVideo,
            ContentKind::ProductAd => ActionCategory::Ad,
            ContentKind::SongShowcase
            | ContentKind::ProductDescription
            | ContentKind::General => ActionCategory::Description,
        }
    }

    /// Whether the model output for this kind is JSON (vs raw HTML).
    pub fn expects_json(&self) -> bool {
        !matches!(self, ContentKind::ProductDescription)
    }
}

/// Inputs to the multi-purpose generator.
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    pub song_title: Option<String>,
    pub product_details: Option<String>,
}

const NO_LECTURE: &str = "[STRICT ACTION MODE] - NO LECTURE. NO PREAMBLE. NO EXPLANATION. \
RETURN DATA ONLY. IF YOU LECTURE, YOU FAIL.";

/// Prompt for the multi-purpose content generator.
pub fn content_prompt(kind: ContentKind, request: &GenerateRequest, brand: &BrandProfile) -> String {
    let context = brand.context_block();
    match kind {
        ContentKind::MusicVideo => format!(
            "{NO_LECTURE}\nROLE: Expert Music Video Director\n{context}\n\
             SONG: \"{}\"\n\n\
             TASK: Generate 5 high-impact YouTube video scenes.\n\
             OUTPUT: Valid JSON array ONLY, objects with keys: scene_number, \
             timestamp, scene_description, canva_image_prompt, camera_movement, \
             mood_colors, text_overlay.",
            request.song_title.as_deref().unwrap_or("untitled track"),
        ),
        ContentKind::ProductAd => format!(
            "{NO_LECTURE}\nROLE: Senior Ad Creative Director\n{context}\n\
             PRODUCT/OFFER: {}\n\n\
             TASK: Generate 3 high-converting ad concepts.\n\
             OUTPUT: Valid JSON array ONLY, objects with keys: ad_concept, \
             hook_text, body_copy, canva_image_prompt, call_to_action, \
             platform_optimization.",
            request.product_details.as_deref().unwrap_or("product"),
        ),
        ContentKind::SongShowcase => format!(
            "{NO_LECTURE}\nROLE: Master E-commerce Visual Designer\n{context}\n\
             SONG/PRODUCT: \"{}\"\n\n\
             TASK: Generate 4 product page image concepts.\n\
             OUTPUT: Valid JSON array ONLY, objects with keys: image_type, \
             canva_image_prompt, purpose, text_elements, color_scheme, \
             where_to_use.",
            request.song_title.as_deref().unwrap_or("featured track"),
        ),
        ContentKind::ProductDescription => format!(
            "{NO_LECTURE}\nROLE: Conversion Copywriter & SEO Specialist\n{context}\n\
             PRODUCT: {}\n\n\
             TASK: Generate an ELITE Shopify product description (SEO/GEO optimized).\n\
             STYLE: 'Answer-First' hierarchy.\n\n\
             OUTPUT STRUCTURE:\n\
             - <h2>: Semantic keyword title.\n\
             - <p class=\"hook\">: Immediate value-driven hook.\n\
             - <div class=\"benefits\"><h3>Benefits</h3><ul><li>Benefit Detail</li></ul></div>\n\
             - <strong>: Urgency CTA.\n\n\
             RETURN RAW HTML ONLY.",
            request.product_details.as_deref().unwrap_or("product"),
        ),
        ContentKind::General => format!(
            "{NO_LECTURE}\n{context}\nCONTEXT: {}\n\n\
             TASK: Generate 5 content ideas.\n\
             OUTPUT: Valid JSON array ONLY, objects with keys: content_idea, \
             canva_image_prompt, use_cases, vibe.",
            request.product_details.as_deref().unwrap_or("General content"),
        ),
    }
}

/// Prompt for a 125-character SEO alt text.
pub fn alt_text_prompt(product_name: &str, brand: &BrandProfile) -> String {
    format!(
        "[SEO ALT-TEXT ENGINE]\n\
         TASK: Write a 125-character 'Answer-First' SEO alt-text for {product_name}.\n\
         CONTEXT: {}\n\n\
         RULES:\n\
         1. NO 'image of' or 'picture of'.\n\
         2. Lead with the most important subject.\n\
         3. Include functional context.\n\
         4. Max 125 characters for accessibility standards.\n\n\
         OUTPUT: Single plain text string.",
        brand.brand_name(),
    )
}

/// Hard-coded alt text used when the model output is unusable.
pub fn alt_text_fallback(product_name: &str) -> String {
    format!("High-quality product image for {product_name}")
}

/// Prompt for a schema.org Product JSON-LD block.
pub fn json_ld_prompt(product_name: &str, price: &str, currency: &str) -> String {
    format!(
        "[STRICT CODE MODE]\n\
         TASK: Generate valid Shopify JSON-LD (Schema.org) script for a product.\n\
         PRODUCT: {product_name}\n\
         PRICE: {price} {currency}\n\
         AVAILABILITY: In Stock\n\n\
         REQUIREMENTS:\n\
         - Context: https://schema.org/\n\
         - Type: Product\n\
         - Include: \"offers\" (price, currency, availability)\n\
         - Include: placeholder \"aggregateRating\" (4.8 stars, 12 reviews).\n\n\
         OUTPUT: JSON ONLY. No markdown. No explanations."
    )
}

/// Minimal valid JSON-LD used when the model output is unusable.
pub fn json_ld_fallback(product_name: &str, price: &str, currency: &str) -> serde_json::Value {
    serde_json::json!({
        "@context": "https://schema.org/",
        "@type": "Product",
        "name": product_name,
        "offers": { "@type": "Offer", "price": price, "priceCurrency": currency }
    })
}

/// Prompt for the bulk analyzer's per-product SEO analysis.
///
/// `body_html` is reduced to plain text before it reaches the model.
pub fn analysis_prompt(product_title: &str, body_html: &str, brand: &BrandProfile) -> String {
    let current = decode_html_entities(&strip_html_tags(body_html));
    format!(
        "{NO_LECTURE}\nROLE: Elite Shopify SEO Auditor\n{}\n\
         PRODUCT TITLE: {product_title}\n\
         CURRENT DESCRIPTION: {current}\n\n\
         TASK: Analyze this product for SEO and trend gaps.\n\
         OUTPUT: Valid JSON object ONLY with keys: optimized_title, \
         optimized_html_description, json_ld_schema, seo_score (0-10), \
         missing_trust_signals (array of strings).",
        brand.context_block(),
    )
}

/// Prompt for the content-burst title/description rewrite.
pub fn burst_prompt(product_title: &str, description_html: &str) -> String {
    let desc = decode_html_entities(&strip_html_tags(description_html));
    format!(
        "Analyze this Shopify Product:\n\
         Title: {product_title}\n\
         Desc: {desc}\n\n\
         Task: Generate an Optimized H1 Title and a Persuasive Description (HTML).\n\
         Constraints:\n\
         1. Title: User-focused, descriptive, clean.\n\
         2. Description: 2 sentences max, sales-driven.\n\
         3. Output JSON: {{ \"title\": \"...\", \"descriptionHtml\": \"...\" }}"
    )
}
