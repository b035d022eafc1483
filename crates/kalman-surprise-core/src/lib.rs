//! Core numerics for Bayesian-surprise scoring of inertial measurement streams.
//!
//! This crate holds the fixed-dimension estimator and the pieces it is built
//! from, designed to work in `no_std` environments (embedded, WASM) with only
//! an allocator:
//!
//! - [`matrix`]: dense matrix kernels (checked products, Gauss-Jordan inverse,
//!   closed-form 3×3 determinant/inverse/pseudo-inverse)
//! - [`vestibular`]: per-axis semicircular-canal filters that turn raw angular
//!   rate into perceived angular rate
//! - [`filter`]: the 12-state [`SurpriseKalmanFilter`] with calibration,
//!   steady-state Riccati solve and state-dependent control linearization
//! - [`surprise`]: KL divergence between the gravity-direction beliefs before
//!   and after each update
//!
//! # Features
//!
//! - `std` (default): Enable standard library support and serde derives
//!
//! # Usage
//!
//! This crate is typically used through the `kalman-surprise` crate, which adds
//! configuration, logging and segment aggregation. It can be used directly for
//! embedded or `no_std` scenarios.
//!
//! ```ignore
//! use kalman_surprise_core::{ImuSample, SurpriseKalmanFilter};
//!
//! let mut filter = SurpriseKalmanFilter::new(0.01, 50);
//! filter.initialize(&calibration_window)?;
//! let surprise = filter.process_sample(t, gx, gy, gz, ax, ay, az)?;
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod constants;
pub mod error;
pub mod filter;
pub mod math;
pub mod matrix;
pub mod surprise;
pub mod types;
pub mod vestibular;

// Re-export commonly used items at crate root
pub use error::{Error, Result};
pub use filter::{Calibration, FilterParams, FilterState, SurpriseKalmanFilter, SystemMatrices};
pub use surprise::bayesian_surprise;
pub use types::{ImuSample, Matrix12, Vector12};
pub use vestibular::{VestibularChannel, VestibularCoefficients};
