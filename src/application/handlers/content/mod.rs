//! Content generation handlers.

mod content_burst;
mod generate_content;

pub use content_burst::{BurstItem, BurstReport, BurstStatus, ContentBurstHandler};
pub use generate_content::{ContentOutcome, GenerateContentHandler};
