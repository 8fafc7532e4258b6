//! The tier catalog: feature sets and monthly ceilings per plan.
//!
//! Static compiled-in configuration; exactly one entry exists per tier.

use serde::Serialize;

use super::{ActionCategory, Feature, PlanTier};

/// Feature set and usage ceilings for a plan tier.
///
/// `None` ceilings mean unlimited. A ceiling of 0 means the tier includes
/// zero uses of that category; whether the feature exists at all is expressed
/// only through the feature set, so callers gate with [`TierLimits::has_feature`]
/// before ever consulting a ceiling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierLimits {
    /// The tier these limits apply to.
    pub tier: PlanTier,
    /// Monthly price in USD.
    pub price_usd: u32,
    /// Maximum products fetched per scan batch. None = unlimited.
    pub products_per_scan: Option<u32>,
    /// Enabled capabilities.
    pub features: &'static [Feature],
    /// AI descriptions per month. None = unlimited.
    pub descriptions_per_month: Option<u32>,
    /// Product ad clips per month. None = unlimited.
    pub ads_per_month: Option<u32>,
    /// Music videos per month. None = unlimited.
    pub music_videos_per_month: Option<u32>,
}

const FREE_FEATURES: &[Feature] = &[
    Feature::DescriptionGenerator,
    Feature::AltText,
    Feature::PolicyScan,
    Feature::PdfReport,
];

const STARTER_FEATURES: &[Feature] = &[
    Feature::DescriptionGenerator,
    Feature::AltText,
    Feature::PolicyScan,
    Feature::PdfReport,
    Feature::BulkAnalyzer,
    Feature::ProductAds,
];

const PROFESSIONAL_FEATURES: &[Feature] = &[
    Feature::DescriptionGenerator,
    Feature::AltText,
    Feature::PolicyScan,
    Feature::PdfReport,
    Feature::BulkAnalyzer,
    Feature::ProductAds,
    Feature::MusicVideo,
    Feature::SongShowcase,
    Feature::PrioritySupport,
];

const ENTERPRISE_FEATURES: &[Feature] = &[
    Feature::DescriptionGenerator,
    Feature::AltText,
    Feature::PolicyScan,
    Feature::PdfReport,
    Feature::BulkAnalyzer,
    Feature::ProductAds,
    Feature::MusicVideo,
    Feature::SongShowcase,
    Feature::PrioritySupport,
    Feature::WhiteLabel,
    Feature::ApiAccess,
    Feature::CustomTraining,
];

impl TierLimits {
    /// Get the limits for a specific tier.
    ///
    /// # Tier Configuration
    ///
    /// | Tier | Price | Scan | Descriptions | Ads | Music Videos |
    /// |------|-------|------|--------------|-----|--------------|
    /// | Free | $0 | 5 | 10 | 0 | 0 |
    /// | Starter | $29 | 25 | 100 | 15 | 0 |
    /// | Professional | $79 | 100 | 500 | 100 | 10 |
    /// | Enterprise | $199 | Unlimited | Unlimited | Unlimited | Unlimited |
    pub fn for_tier(tier: PlanTier) -> Self {
        match tier {
            PlanTier::Free => Self {
                tier,
                price_usd: 0,
                products_per_scan: Some(5),
                features: FREE_FEATURES,
                descriptions_per_month: Some(10),
                ads_per_month: Some(0),
                music_videos_per_month: Some(0),
            },
            PlanTier::Starter => Self {
                tier,
                price_usd: 29,
                products_per_scan: Some(25),
                features: STARTER_FEATURES,
                descriptions_per_month: Some(100),
                // Safety limit: 15 videos
                ads_per_month: Some(15),
                music_videos_per_month: Some(0),
            },
            PlanTier::Professional => Self {
                tier,
                price_usd: 79,
                products_per_scan: Some(100),
                features: PROFESSIONAL_FEATURES,
                descriptions_per_month: Some(500),
                ads_per_month: Some(100),
                music_videos_per_month: Some(10),
            },
            PlanTier::Enterprise => Self {
                tier,
                price_usd: 199,
                products_per_scan: None,
                features: ENTERPRISE_FEATURES,
                descriptions_per_month: None,
                ads_per_month: None,
                music_videos_per_month: None,
            },
        }
    }

    /// Looks up limits for an optional tier.
    ///
    /// `None` (unknown plan id) carries no entitlement: there is no default
    /// fallback here, callers deny gated operations themselves.
    pub fn lookup(tier: Option<PlanTier>) -> Option<Self> {
        tier.map(Self::for_tier)
    }

    /// True iff this tier's feature set contains `feature`.
    pub fn has_feature(&self, feature: Feature) -> bool {
        self.features.contains(&feature)
    }

    /// The monthly ceiling for a category. None = unlimited.
    pub fn ceiling(&self, category: ActionCategory) -> Option<u32> {
        match category {
            ActionCategory::Description => self.descriptions_per_month,
            ActionCategory::Ad => self.ads_per_month,
            ActionCategory::MusicVideo => self.music_videos_per_month,
        }
    }

    /// Check if the monthly ceiling has been reached for a category.
    ///
    /// `current_usage` is the count as it stood before the current action:
    /// the action that would bring usage up to the ceiling is the last one
    /// permitted, so denial uses `>=`. Unlimited ceilings never deny.
    pub fn limit_reached(&self, category: ActionCategory, current_usage: u32) -> bool {
        self.ceiling(category)
            .map(|max| current_usage >= max)
            .unwrap_or(false)
    }

    /// Human-readable limit lines for the dashboard.
    pub fn display_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        match self.products_per_scan {
            None => lines.push("Unlimited products per scan".to_string()),
            Some(n) => lines.push(format!("Scan up to {} products", n)),
        }
        match self.descriptions_per_month {
            None => lines.push("Unlimited AI descriptions".to_string()),
            Some(n) => lines.push(format!("{} AI descriptions/month", n)),
        }
        match self.ads_per_month {
            None => lines.push("Unlimited video ads".to_string()),
            Some(n) if n > 0 => {
                lines.push(format!("{} video ads/month (8-second motion clips)", n))
            }
            _ => {}
        }
        match self.music_videos_per_month {
            None => lines.push("Unlimited music videos".to_string()),
            Some(n) if n > 0 => lines.push(format!("{} music videos/month", n)),
            _ => {}
        }

        lines
    }
}
