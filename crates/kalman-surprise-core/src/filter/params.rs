//! Tuning parameters of the surprise filter.

use crate::constants::{
    DEFAULT_ACCEL_NOISE_RATIO, DEFAULT_GRAVITY_NOISE_RATIO, DEFAULT_OBSERVATION_NOISE_RATIO,
    DEFAULT_RICCATI_ITERATIONS, DEFAULT_SIGMA_OMEGA, DEFAULT_SIGMA_V, DEFAULT_TAU_A,
    DEFAULT_TAU_C, DEFAULT_TAU_D,
};

/// Noise model and time constants.
///
/// Acceleration-related noise is expressed as a ratio of the calibrated gravity
/// magnitude, so it scales with the accelerometer unit. The surprise metric's
/// singularity threshold is absolute though: with gravity near 1 (data in g)
/// the gravity-block determinant falls below it and surprise is computed
/// against the identity fallback. Feed accelerations in m/s² or larger units.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(default))]
pub struct FilterParams {
    /// Angular-rate input noise σω (rad/s). Default: 0.7.
    pub sigma_omega: f64,
    /// Perceived angular-rate observation noise σV (rad/s). Default: 0.175.
    pub sigma_v: f64,
    /// σA = σAz = ratio · gravity. Default: 0.3.
    pub accel_noise_ratio: f64,
    /// σG = ratio · gravity. Default: 1e-4.
    pub gravity_noise_ratio: f64,
    /// σF = ratio · gravity. Default: 0.002.
    pub observation_noise_ratio: f64,
    /// Vestibular canal time constant τd (s). Default: 7.
    pub tau_d: f64,
    /// Vestibular adaptation time constant τa (s). Default: 190.
    pub tau_a: f64,
    /// Gyro-bias leak time constant tc (s). Default: 4.
    pub tau_c: f64,
    /// Fixed number of steady-state Riccati iterations. Default: 100.
    pub riccati_iterations: usize,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            sigma_omega: DEFAULT_SIGMA_OMEGA,
            sigma_v: DEFAULT_SIGMA_V,
            accel_noise_ratio: DEFAULT_ACCEL_NOISE_RATIO,
            gravity_noise_ratio: DEFAULT_GRAVITY_NOISE_RATIO,
            observation_noise_ratio: DEFAULT_OBSERVATION_NOISE_RATIO,
            tau_d: DEFAULT_TAU_D,
            tau_a: DEFAULT_TAU_A,
            tau_c: DEFAULT_TAU_C,
            riccati_iterations: DEFAULT_RICCATI_ITERATIONS,
        }
    }
}

impl FilterParams {
    /// Bias retention per step, `k1 = tc / (dt + tc)`.
    #[inline]
    pub fn bias_retention(&self, dt: f64) -> f64 {
        self.tau_c / (dt + self.tau_c)
    }

    /// Gyro-to-bias feed, `k2 = dt / (dt + tc)`.
    #[inline]
    pub fn bias_gain(&self, dt: f64) -> f64 {
        dt / (dt + self.tau_c)
    }
}
