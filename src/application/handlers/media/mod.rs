//! Media optimization handlers.

mod optimize_media;

pub use optimize_media::{MediaItem, MediaReport, MediaStatus, OptimizeMediaHandler};
