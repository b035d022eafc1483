//! # kalman-surprise
//!
//! Score inertial measurement streams by how surprising each sample is.
//!
//! A 12-state Kalman filter fuses gyroscope and accelerometer samples (with
//! the gyroscope passed through a model of the semicircular canals) and, for
//! every sample, reports the KL divergence between its gravity-direction
//! belief before and after the update. Steady motion settles to a small,
//! stable surprise; abrupt or unexpected motion spikes it.
//!
//! This crate wraps the `no_std` core with:
//! - [`Config`]: validated session settings and a [`FailurePolicy`]
//! - [`SurpriseAnalyzer`]: calibration and streaming with `tracing` logs
//! - [`analysis`]: `ln(s + 1)` segment aggregation
//!
//! ## Quick Start
//!
//! ```ignore
//! use kalman_surprise::{Config, ImuSample, SurpriseAnalyzer};
//!
//! let mut analyzer = SurpriseAnalyzer::new(Config::new(0.01, 50));
//! analyzer.calibrate(&resting_window)?;
//!
//! for sample in &stream {
//!     if let Some(surprise) = analyzer.push(sample)? {
//!         println!("{:.3} {:.6}", sample.time, surprise);
//!     }
//! }
//!
//! let report = analyzer.summarize(&[0..200, 200..450]);
//! println!("mean ln(s+1) per segment: {:.4}", report.overall_mean);
//! ```
//!
//! The filter itself is available as [`SurpriseKalmanFilter`] for callers that
//! need no session handling.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod analyzer;
mod config;
mod error;

pub mod analysis;

pub use analyzer::{RunSummary, SurpriseAnalyzer};
pub use config::{Config, FailurePolicy};
pub use error::AnalyzerError;

pub use analysis::{log_surprise, summarize_segments, SegmentReport, SegmentSummary};

// Re-export the core types so most callers need a single dependency.
pub use kalman_surprise_core::{
    bayesian_surprise, Calibration, Error, FilterParams, FilterState, ImuSample,
    SurpriseKalmanFilter, SystemMatrices, VestibularChannel, VestibularCoefficients,
};
