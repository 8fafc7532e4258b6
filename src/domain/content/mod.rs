//! Content engine domain - prompts, model-output extraction, text utilities.

mod analysis;
mod brand;
mod extract;
mod html;
mod prompt;

pub use analysis::{BurstRewrite, ProductAnalysis};
pub use brand::BrandProfile;
pub use extract::{extract_html, extract_json, strip_code_fences, ExtractError};
pub use html::{decode_html_entities, strip_html_tags};
pub use prompt::{
    alt_text_fallback, alt_text_prompt, analysis_prompt, burst_prompt, content_prompt,
    json_ld_fallback, json_ld_prompt, ContentKind, GenerateRequest,
};
