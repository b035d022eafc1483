//! Errors surfaced by the analyzer.

/// Error from an analysis session.
///
/// Filter errors are wrapped with the context in which they happened so a
/// failing stream can be traced back to the offending sample.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalyzerError {
    /// The calibration window could not be turned into a filter.
    #[error("calibration failed: {0}")]
    Calibration(#[source] kalman_surprise_core::Error),

    /// A sample in the stream failed and the policy is to abort.
    #[error("sample {index} failed: {source}")]
    Sample {
        /// Zero-based position of the sample in the processed stream.
        index: usize,
        /// Underlying filter error.
        #[source]
        source: kalman_surprise_core::Error,
    },
}
