//! Mutable state carried from one sample to the next.

use crate::constants::GRAVITY_OFFSET;
use crate::types::{Matrix12, Matrix12x7, Vector12, Vector3};

use super::control::{compute_control_matrix, disturbance_matrix};

/// Everything `process_sample` reads and rewrites.
///
/// Owned by exactly one filter. A step works on a copy and the filter commits
/// it only when the step succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Posterior state estimate.
    pub x: Vector12,
    /// Auxiliary trajectory `F·x + E·XE`, the source of the next `M`.
    pub x_aux: Vector12,
    /// Posterior estimate before the most recent sample.
    pub x_prev: Vector12,
    /// Posterior covariance.
    pub p: Matrix12,
    /// Covariance before the most recent prediction.
    pub p_prev: Matrix12,
    /// Control matrix linearized at the auxiliary-trajectory gravity.
    pub m: Matrix12x7,
    /// Control matrix linearized at the previous step's gravity.
    pub m_in: Matrix12x7,
    /// Disturbance matrix, `M` with the gravity-drift entry.
    pub e: Matrix12x7,
}

impl FilterState {
    /// State right after calibration: gravity block seeded, `P = P_prev`, all
    /// trajectories equal and all control matrices linearized at that gravity.
    pub fn new(gravity: &Vector3, covariance: Matrix12, dt: f64, bias_gain: f64) -> Self {
        let mut x = Vector12::zeros();
        x.fixed_rows_mut::<3>(GRAVITY_OFFSET).copy_from(gravity);

        let m = compute_control_matrix(gravity, dt, bias_gain);
        Self {
            x,
            x_aux: x,
            x_prev: x,
            p: covariance,
            p_prev: covariance,
            m,
            m_in: m,
            e: disturbance_matrix(&m),
        }
    }

    /// Gravity block of the posterior estimate.
    #[inline]
    pub fn gravity(&self) -> Vector3 {
        gravity_of(&self.x)
    }

    /// Gravity block of the auxiliary trajectory.
    #[inline]
    pub fn aux_gravity(&self) -> Vector3 {
        gravity_of(&self.x_aux)
    }

    /// Gravity block of the previous posterior.
    #[inline]
    pub fn prev_gravity(&self) -> Vector3 {
        gravity_of(&self.x_prev)
    }

    /// Re-linearize `M`, `M_in` and `E` after an update.
    pub fn relinearize(&mut self, dt: f64, bias_gain: f64) {
        self.m = compute_control_matrix(&self.aux_gravity(), dt, bias_gain);
        self.m_in = compute_control_matrix(&self.prev_gravity(), dt, bias_gain);
        self.e = disturbance_matrix(&self.m);
    }
}

#[inline]
fn gravity_of(x: &Vector12) -> Vector3 {
    x.fixed_rows::<3>(GRAVITY_OFFSET).into_owned()
}
