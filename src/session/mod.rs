//! Run-level API: one call from two images to an MP4, with progress reporting.

/// Full-pipeline entry point.
pub mod generate;
/// Progress values and events.
pub mod progress;
