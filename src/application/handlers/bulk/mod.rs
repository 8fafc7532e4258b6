//! Bulk pipeline handlers: scan, analyze, apply.

mod analyze_products;
mod apply_updates;
mod scan_products;

pub use analyze_products::{AnalysisItem, AnalysisOutcome, AnalyzeProductsHandler};
pub use apply_updates::{ApplyItem, ApplyReport, ApplyResult, ApplyStatus, ApplyUpdatesHandler};
pub use scan_products::ScanProductsHandler;
