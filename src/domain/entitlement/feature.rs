//! Gated capability names.

use serde::{Deserialize, Serialize};

/// A capability that a plan tier may or may not include.
///
/// Feature access is binary and checked independently of usage ceilings:
/// a shop first needs the feature, then headroom under the monthly limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    DescriptionGenerator,
    AltText,
    PolicyScan,
    PdfReport,
    BulkAnalyzer,
    ProductAds,
    MusicVideo,
    SongShowcase,
    PrioritySupport,
    WhiteLabel,
    ApiAccess,
    CustomTraining,
}

impl Feature {
    /// Parses a feature name leniently; unknown names yield `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "description_generator" => Some(Feature::DescriptionGenerator),
            "alt_text" => Some(Feature::AltText),
            "policy_scan" => Some(Feature::PolicyScan),
            "pdf_report" => Some(Feature::PdfReport),
            "bulk_analyzer" => Some(Feature::BulkAnalyzer),
            "product_ads" => Some(Feature::ProductAds),
            "music_video" => Some(Feature::MusicVideo),
            "song_showcase" => Some(Feature::SongShowcase),
            "priority_support" => Some(Feature::PrioritySupport),
            "white_label" => Some(Feature::WhiteLabel),
            "api_access" => Some(Feature::ApiAccess),
            "custom_training" => Some(Feature::CustomTraining),
            _ => None,
        }
    }
}
