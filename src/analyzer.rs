//! Session wrapper that drives one filter over a sample stream.

use std::ops::Range;

use kalman_surprise_core::{Calibration, ImuSample, SurpriseKalmanFilter};
use serde::{Deserialize, Serialize};

use crate::analysis::{log_surprise, summarize_segments, SegmentReport};
use crate::config::{Config, FailurePolicy};
use crate::error::AnalyzerError;

/// Counters for one [`SurpriseAnalyzer::run`] call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RunSummary {
    /// Samples that produced a surprise value.
    pub processed: usize,
    /// Samples dropped under [`FailurePolicy::SkipSample`].
    pub skipped: usize,
    /// Processed samples whose `ln(s + 1)` was NaN or infinite: a non-finite
    /// surprise, or one at or below -1 from a degenerate gravity block.
    pub non_finite: usize,
    /// Mean of the finite `ln(s + 1)` values of this run; 0.0 if none.
    pub mean_log_surprise: f64,
}

/// Calibrates a [`SurpriseKalmanFilter`] and feeds it samples, applying the
/// configured [`FailurePolicy`] and logging through `tracing`.
///
/// # Example
///
/// ```ignore
/// use kalman_surprise::{Config, SurpriseAnalyzer};
///
/// let mut analyzer = SurpriseAnalyzer::new(Config::hundred_hz());
/// analyzer.calibrate(&resting)?;
/// let summary = analyzer.run(&stream)?;
/// println!("{} samples, mean ln(s+1) = {:.4}", summary.processed, summary.mean_log_surprise);
/// ```
#[derive(Debug, Clone)]
pub struct SurpriseAnalyzer {
    config: Config,
    filter: SurpriseKalmanFilter,
    samples_seen: usize,
    skipped: usize,
}

impl SurpriseAnalyzer {
    /// Create an analyzer with an uninitialized filter.
    ///
    /// # Panics
    ///
    /// Panics if [`Config::validate`] rejects `config`.
    pub fn new(config: Config) -> Self {
        if let Err(msg) = config.validate() {
            panic!("{}", msg);
        }
        let filter = SurpriseKalmanFilter::with_params(config.dt, config.mean_range, config.params);
        Self {
            config,
            filter,
            samples_seen: 0,
            skipped: 0,
        }
    }

    /// Calibrate the filter from a resting window.
    ///
    /// Re-calibrating starts a fresh session: history and counters reset.
    pub fn calibrate(&mut self, window: &[ImuSample]) -> Result<Calibration, AnalyzerError> {
        let _span = tracing::info_span!("calibrate", window = window.len()).entered();

        let calibration = *self
            .filter
            .initialize(window)
            .map_err(AnalyzerError::Calibration)?;
        self.samples_seen = 0;
        self.skipped = 0;

        tracing::info!(
            gravity = calibration.gravity,
            roll = calibration.roll,
            pitch = calibration.pitch,
            samples = calibration.samples_used,
            "calibrated"
        );
        if let Some(p) = self.filter.covariance() {
            tracing::debug!(
                trace = p.trace(),
                iterations = self.config.params.riccati_iterations,
                "steady-state covariance"
            );
        }

        Ok(calibration)
    }

    /// Process one sample.
    ///
    /// Returns `Ok(None)` when the sample failed and the policy is
    /// [`FailurePolicy::SkipSample`].
    pub fn push(&mut self, sample: &ImuSample) -> Result<Option<f64>, AnalyzerError> {
        let index = self.samples_seen;
        self.samples_seen += 1;

        match self.filter.process(sample) {
            Ok(surprise) => {
                tracing::trace!(index, time = sample.time, surprise, "sample");
                if !log_surprise(surprise).is_finite() {
                    tracing::warn!(index, time = sample.time, surprise, "non-finite log surprise");
                }
                if self.config.log_every > 0 && self.samples_seen % self.config.log_every == 0 {
                    tracing::debug!(
                        samples = self.samples_seen,
                        skipped = self.skipped,
                        "progress"
                    );
                }
                Ok(Some(surprise))
            }
            Err(source) => match self.config.failure_policy {
                FailurePolicy::Abort => Err(AnalyzerError::Sample { index, source }),
                FailurePolicy::SkipSample => {
                    self.skipped += 1;
                    tracing::warn!(index, time = sample.time, error = %source, "skipping sample");
                    Ok(None)
                }
            },
        }
    }

    /// Process a stream of samples in order.
    ///
    /// Under [`FailurePolicy::Abort`] the first failing sample stops the run;
    /// samples before it stay in the history.
    pub fn run(&mut self, samples: &[ImuSample]) -> Result<RunSummary, AnalyzerError> {
        let _span = tracing::info_span!("run", samples = samples.len()).entered();

        let mut summary = RunSummary::default();
        let mut total = 0.0;
        let mut finite = 0usize;
        for sample in samples {
            match self.push(sample)?.map(log_surprise) {
                Some(log) if log.is_finite() => {
                    summary.processed += 1;
                    total += log;
                    finite += 1;
                }
                Some(_) => {
                    summary.processed += 1;
                    summary.non_finite += 1;
                }
                None => summary.skipped += 1,
            }
        }
        if finite > 0 {
            summary.mean_log_surprise = total / finite as f64;
        }

        tracing::info!(
            processed = summary.processed,
            skipped = summary.skipped,
            non_finite = summary.non_finite,
            mean_log_surprise = summary.mean_log_surprise,
            "run complete"
        );
        Ok(summary)
    }

    /// Aggregate the surprise history over `ranges` of history indices.
    pub fn summarize(&self, ranges: &[Range<usize>]) -> SegmentReport {
        summarize_segments(self.filter.surprise_history(), ranges, self.config.dt)
    }

    /// Surprise of every processed sample since calibration.
    pub fn surprise_history(&self) -> &[f64] {
        self.filter.surprise_history()
    }

    /// Samples pushed since calibration, including skipped ones.
    pub fn samples_seen(&self) -> usize {
        self.samples_seen
    }

    /// Samples skipped since calibration.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The underlying filter.
    pub fn filter(&self) -> &SurpriseKalmanFilter {
        &self.filter
    }

    /// The session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }
}
