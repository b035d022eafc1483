//! Per-segment surprise summaries.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::log_surprise;

/// Summary of one segment of the surprise history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    /// Index of the first sample after clamping to the history.
    pub start: usize,
    /// Number of samples in the segment after clamping.
    pub len: usize,
    /// Samples whose `ln(s + 1)` is not finite, left out of both figures.
    pub non_finite: usize,
    /// Mean of the finite `ln(s + 1)` values in the segment.
    pub mean_log_surprise: f64,
    /// Sum of the finite `ln(s + 1)` values divided by the segment duration
    /// in seconds.
    pub log_surprise_per_second: f64,
}

impl SegmentSummary {
    /// Summarize `values`, a slice of the history beginning at `start`.
    ///
    /// A slice with no finite `ln(s + 1)` values yields zero mean and zero
    /// rate.
    pub fn from_slice(start: usize, values: &[f64], dt: f64) -> Self {
        let len = values.len();
        let (finite, total) = values
            .iter()
            .map(|&s| log_surprise(s))
            .filter(|l| l.is_finite())
            .fold((0usize, 0.0f64), |(n, sum), l| (n + 1, sum + l));

        if finite == 0 {
            return Self {
                start,
                len,
                non_finite: len,
                mean_log_surprise: 0.0,
                log_surprise_per_second: 0.0,
            };
        }

        Self {
            start,
            len,
            non_finite: len - finite,
            mean_log_surprise: total / finite as f64,
            log_surprise_per_second: total / (len as f64 * dt),
        }
    }

    /// Duration of the segment in seconds.
    pub fn duration(&self, dt: f64) -> f64 {
        self.len as f64 * dt
    }

    /// Whether the segment held no samples.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether any sample contributed to the mean.
    pub fn has_finite(&self) -> bool {
        self.len > self.non_finite
    }
}

/// Summaries of several segments plus their overall mean.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SegmentReport {
    /// One entry per requested range, in request order.
    pub segments: Vec<SegmentSummary>,
    /// Mean of `mean_log_surprise` over segments with at least one finite
    /// value; 0.0 if none.
    pub overall_mean: f64,
}

/// Summarize `ranges` of `history`.
///
/// Ranges reaching past the end of the history are clamped to it; a range
/// that ends up empty, or holds only non-finite values, is left out of the
/// overall mean.
pub fn summarize_segments(history: &[f64], ranges: &[Range<usize>], dt: f64) -> SegmentReport {
    let segments: Vec<SegmentSummary> = ranges
        .iter()
        .map(|range| {
            let end = range.end.min(history.len());
            let start = range.start.min(end);
            SegmentSummary::from_slice(start, &history[start..end], dt)
        })
        .collect();

    let means: Vec<f64> = segments
        .iter()
        .filter(|s| s.has_finite())
        .map(|s| s.mean_log_surprise)
        .collect();
    let overall_mean = if means.is_empty() {
        0.0
    } else {
        means.iter().sum::<f64>() / means.len() as f64
    };

    SegmentReport {
        segments,
        overall_mean,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.01;

    #[test]
    fn test_constant_segment() {
        // ln(e - 1 + 1) = 1 for every sample.
        let s = std::f64::consts::E - 1.0;
        let summary = SegmentSummary::from_slice(0, &[s; 50], DT);
        assert_eq!(summary.len, 50);
        assert!((summary.mean_log_surprise - 1.0).abs() < 1e-12);
        // 50 nats over 0.5 s
        assert!((summary.log_surprise_per_second - 100.0).abs() < 1e-9);
        assert!((summary.duration(DT) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_empty_segment() {
        let summary = SegmentSummary::from_slice(3, &[], DT);
        assert!(summary.is_empty());
        assert_eq!(summary.mean_log_surprise, 0.0);
        assert_eq!(summary.log_surprise_per_second, 0.0);
    }

    #[test]
    fn test_overall_mean_of_segment_means() {
        let history = [0.0, 0.0, 0.0, 0.0, 1.0, 1.0];
        let report = summarize_segments(&history, &[0..4, 4..6], DT);

        assert_eq!(report.segments.len(), 2);
        assert_eq!(report.segments[0].mean_log_surprise, 0.0);
        let ln2 = std::f64::consts::LN_2;
        assert!((report.segments[1].mean_log_surprise - ln2).abs() < 1e-15);
        // Segments are weighted equally regardless of length.
        assert!((report.overall_mean - ln2 / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_ranges_are_clamped() {
        let history = [1.0; 10];
        let report = summarize_segments(&history, &[8..20, 15..30], DT);

        assert_eq!(report.segments[0].start, 8);
        assert_eq!(report.segments[0].len, 2);
        assert_eq!(report.segments[1].start, 10);
        assert!(report.segments[1].is_empty());
        let ln2 = std::f64::consts::LN_2;
        assert!((report.overall_mean - ln2).abs() < 1e-15);
    }

    #[test]
    fn test_non_finite_values_are_left_out() {
        // ln(1 + s) is NaN for s < -1 and for NaN, -inf at s = -1.
        let e1 = std::f64::consts::E - 1.0;
        let summary = SegmentSummary::from_slice(0, &[e1, -1.49, e1, f64::NAN, -1.0], DT);
        assert_eq!(summary.len, 5);
        assert_eq!(summary.non_finite, 3);
        assert!((summary.mean_log_surprise - 1.0).abs() < 1e-12);
        // 2 nats over 0.05 s
        assert!((summary.log_surprise_per_second - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_all_non_finite_segment_skipped_in_overall_mean() {
        let history = [1.0, 1.0, -1.49, -1.49];
        let report = summarize_segments(&history, &[0..2, 2..4], DT);

        assert!(!report.segments[1].is_empty());
        assert!(!report.segments[1].has_finite());
        assert_eq!(report.segments[1].mean_log_surprise, 0.0);
        let ln2 = std::f64::consts::LN_2;
        assert!((report.overall_mean - ln2).abs() < 1e-15);
    }

    #[test]
    fn test_no_segments() {
        let report = summarize_segments(&[0.5, 0.25], &[], DT);
        assert!(report.segments.is_empty());
        assert_eq!(report.overall_mean, 0.0);
    }

    #[test]
    #[allow(clippy::reversed_empty_ranges)]
    fn test_reversed_range_is_empty() {
        let report = summarize_segments(&[1.0; 10], &[6..2], DT);
        assert!(report.segments[0].is_empty());
        assert_eq!(report.overall_mean, 0.0);
    }
}
