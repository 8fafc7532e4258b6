//! Per-shop brand profile used to ground every prompt.

use serde::{Deserialize, Serialize};

/// Business context a merchant configures during onboarding.
///
/// Every field is optional; prompts substitute neutral defaults so content
/// generation works before onboarding completes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandProfile {
    pub brand_name: Option<String>,
    pub identity_summary: Option<String>,
    pub target_audience: Option<String>,
    pub usp: Option<String>,
}

impl BrandProfile {
    pub fn brand_name(&self) -> &str {
        self.brand_name.as_deref().unwrap_or("your brand")
    }

    pub fn target_audience(&self) -> &str {
        self.target_audience
            .as_deref()
            .unwrap_or("quality-conscious shoppers")
    }

    /// Context block prepended to generation prompts.
    pub fn context_block(&self) -> String {
        let mut block = format!("BRAND CONTEXT: {}", self.brand_name());
        if let Some(identity) = &self.identity_summary {
            block.push_str(&format!("\nIDENTITY/MISSION: {}", identity));
        }
        block.push_str(&format!("\nTARGET AUDIENCE: {}", self.target_audience()));
        if let Some(usp) = &self.usp {
            block.push_str(&format!("\nUNIQUE SELLING PROPOSITION: {}", usp));
        }
        block
    }
}
