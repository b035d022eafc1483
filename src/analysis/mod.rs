//! Segment-level aggregation of a surprise history.
//!
//! Raw surprise is heavy-tailed, so it is compressed with `ln(s + 1)` before
//! averaging. A segment is a half-open index range into the history, usually
//! a motion phase detected by some external segmentation.

mod segments;

pub use segments::{summarize_segments, SegmentReport, SegmentSummary};

/// `ln(s + 1)`, the per-sample quantity that segments average.
#[inline]
pub fn log_surprise(surprise: f64) -> f64 {
    surprise.ln_1p()
}
