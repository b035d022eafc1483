//! State-dependent control-input matrices.
//!
//! The exogenous input is `[gx, gy, gz, ax, ay, az, 0]`. Rows 0–2 pass the gyro
//! through to the angular-rate states, rows 3–5 feed it into the bias leak with
//! gain `k2`, and rows 9–11 pass the acceleration through. Rows 6–8 linearize
//! the rotation of the gravity vector by the angular rate, `ġ = −ω × g`, around
//! a gravity estimate, which is why the matrix has to be rebuilt every step.

use crate::constants::{BIAS_OFFSET, GRAVITY_OFFSET, LINEAR_ACCEL_OFFSET};
use crate::types::{Matrix12x7, Vector3};

/// Input column that carries gravity-drift noise in `E`.
const GRAVITY_DRIFT_INPUT: usize = 6;

/// Build the control-input matrix for a gravity estimate.
///
/// Used for `M` (auxiliary-trajectory gravity) and `M_in` (previous-step
/// gravity). Returns a fresh matrix so the two never alias.
pub fn compute_control_matrix(gravity: &Vector3, dt: f64, bias_gain: f64) -> Matrix12x7 {
    let mut m = Matrix12x7::zeros();

    for axis in 0..3 {
        m[(axis, axis)] = 1.0;
        m[(BIAS_OFFSET + axis, axis)] = bias_gain;
        m[(LINEAR_ACCEL_OFFSET + axis, 3 + axis)] = 1.0;
    }

    let (g0, g1, g2) = (gravity.x, gravity.y, gravity.z);
    let row = GRAVITY_OFFSET;
    m[(row, 1)] = -g2 * dt;
    m[(row, 2)] = g1 * dt;
    m[(row + 1, 0)] = g2 * dt;
    m[(row + 1, 2)] = -g0 * dt;
    m[(row + 2, 0)] = -g1 * dt;
    m[(row + 2, 1)] = g0 * dt;

    m
}

/// Disturbance matrix `E`: `M` plus the gravity-drift coupling `E[8,6] = 1`.
pub fn disturbance_matrix(control: &Matrix12x7) -> Matrix12x7 {
    let mut e = *control;
    e[(GRAVITY_OFFSET + 2, GRAVITY_DRIFT_INPUT)] = 1.0;
    e
}
