//! Request shapes for the bulk pipeline endpoint.

use serde::Deserialize;

use crate::application::handlers::bulk::ApplyItem;
use crate::ports::ProductSummary;

/// Body of `POST /api/bulk`, discriminated by `mode`.
#[derive(Debug, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum BulkRequest {
    Scan,
    Analyze {
        products: Vec<ProductSummary>,
    },
    Apply {
        products: Vec<ApplyItem>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_discriminator_selects_variant() {
        let scan: BulkRequest = serde_json::from_str(r#"{"mode": "scan"}"#).unwrap();
        assert!(matches!(scan, BulkRequest::Scan));

        let analyze: BulkRequest = serde_json::from_str(
            r#"{"mode": "analyze", "products": [{"id": "gid://shopify/Product/1", "title": "Lamp"}]}"#,
        )
        .unwrap();
        match analyze {
            BulkRequest::Analyze { products } => assert_eq!(products.len(), 1),
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let result = serde_json::from_str::<BulkRequest>(r#"{"mode": "explode"}"#);
        assert!(result.is_err());
    }
}
