//! Fixed system matrices: transition F, observation H and noise Q, R.

use crate::constants::{BIAS_OFFSET, GRAVITY_OFFSET, LINEAR_ACCEL_OFFSET, OBS_DIM};
use crate::math::sq;
use crate::types::{Matrix12, Matrix12x7, Matrix6, Matrix6x12, Matrix7, Vector6, Vector7};

use super::NoiseScales;

/// The time-invariant part of the model, fixed after calibration.
#[derive(Debug, Clone, PartialEq)]
pub struct SystemMatrices {
    /// State transition.
    pub f: Matrix12,
    /// Observation model.
    pub h: Matrix6x12,
    /// Process noise covariance, `E · Qtmp · Eᵗ`.
    pub q: Matrix12,
    /// Observation noise covariance.
    pub r: Matrix6,
}

impl SystemMatrices {
    /// Build the model from the calibrated noise, the initial disturbance
    /// matrix and the bias retention `k1`.
    pub fn new(noise: &NoiseScales, disturbance: &Matrix12x7, bias_retention: f64) -> Self {
        Self {
            f: transition_matrix(bias_retention),
            h: observation_matrix(),
            q: process_noise(noise, disturbance),
            r: observation_noise(noise),
        }
    }
}

/// Identity, except ω and linear-acceleration rows are zeroed (fully
/// input-driven) and the bias rows leak with `k1`.
pub fn transition_matrix(bias_retention: f64) -> Matrix12 {
    let mut f = Matrix12::identity();
    for axis in 0..3 {
        f[(axis, axis)] = 0.0;
        f[(BIAS_OFFSET + axis, BIAS_OFFSET + axis)] = bias_retention;
        f[(LINEAR_ACCEL_OFFSET + axis, LINEAR_ACCEL_OFFSET + axis)] = 0.0;
    }
    f
}

/// Rows 0–2 observe `ω − b`, rows 3–5 observe `g + a`.
pub fn observation_matrix() -> Matrix6x12 {
    let mut h = Matrix6x12::zeros();
    for axis in 0..3 {
        h[(axis, axis)] = 1.0;
        h[(axis, BIAS_OFFSET + axis)] = -1.0;
        h[(3 + axis, GRAVITY_OFFSET + axis)] = 1.0;
        h[(3 + axis, LINEAR_ACCEL_OFFSET + axis)] = 1.0;
    }
    h
}

/// 7×7 diagonal input-noise block.
pub fn input_noise(noise: &NoiseScales) -> Matrix7 {
    let so = sq(noise.sigma_omega);
    let sa = sq(noise.sigma_a);
    Matrix7::from_diagonal(&Vector7::from([
        so,
        so,
        so,
        sa,
        sa,
        sq(noise.sigma_az),
        sq(noise.sigma_g),
    ]))
}

/// Congruence transform of the input noise into state space.
pub fn process_noise(noise: &NoiseScales, disturbance: &Matrix12x7) -> Matrix12 {
    disturbance * input_noise(noise) * disturbance.transpose()
}

/// Diagonal observation noise: σV² for perceived rate, σF² for acceleration.
pub fn observation_noise(noise: &NoiseScales) -> Matrix6 {
    let mut diag = Vector6::zeros();
    for i in 0..OBS_DIM {
        diag[i] = if i < 3 { sq(noise.sigma_v) } else { sq(noise.sigma_f) };
    }
    Matrix6::from_diagonal(&diag)
}
