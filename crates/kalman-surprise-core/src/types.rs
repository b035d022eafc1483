//! Type aliases and common types.

use nalgebra::{RowVector2, SMatrix, SVector};

use crate::constants::{INPUT_DIM, OBS_DIM, STATE_DIM};

/// 12×12 matrix for the state transition and state covariances.
pub type Matrix12 = SMatrix<f64, STATE_DIM, STATE_DIM>;

/// 12-dimensional state vector.
pub type Vector12 = SVector<f64, STATE_DIM>;

/// 12×7 control-input matrix (M, M_in, E).
pub type Matrix12x7 = SMatrix<f64, STATE_DIM, INPUT_DIM>;

/// 6×12 observation matrix.
pub type Matrix6x12 = SMatrix<f64, OBS_DIM, STATE_DIM>;

/// 6×6 matrix for observation noise and innovation covariance.
pub type Matrix6 = SMatrix<f64, OBS_DIM, OBS_DIM>;

/// 6-dimensional observation vector.
pub type Vector6 = SVector<f64, OBS_DIM>;

/// 7×7 matrix for the input-noise block.
pub type Matrix7 = SMatrix<f64, INPUT_DIM, INPUT_DIM>;

/// 7-dimensional exogenous input vector.
pub type Vector7 = SVector<f64, INPUT_DIM>;

/// 3×3 matrix for gravity-block covariances and rotations.
pub type Matrix3 = SMatrix<f64, 3, 3>;

/// 3-dimensional vector (gravity block, gyro or accel triple).
pub type Vector3 = SVector<f64, 3>;

/// 2×2 vestibular state-transition matrix.
pub type Matrix2 = SMatrix<f64, 2, 2>;

/// 2-dimensional vestibular memory.
pub type Vector2 = SVector<f64, 2>;

/// 1×2 vestibular output row.
pub type Row2 = RowVector2<f64>;

/// One synchronized inertial sample.
///
/// Gyro in rad/s, accel in whatever unit the calibration window uses.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct ImuSample {
    /// Sample timestamp in seconds.
    pub time: f64,
    /// Angular rate `[gx, gy, gz]`.
    pub gyro: [f64; 3],
    /// Acceleration `[ax, ay, az]`.
    pub accel: [f64; 3],
}

impl ImuSample {
    /// Create a sample from its timestamp, gyro and accel triples.
    pub fn new(time: f64, gyro: [f64; 3], accel: [f64; 3]) -> Self {
        Self { time, gyro, accel }
    }

    /// Angular rate as a vector.
    #[inline]
    pub fn gyro_vector(&self) -> Vector3 {
        Vector3::from(self.gyro)
    }

    /// Acceleration as a vector.
    #[inline]
    pub fn accel_vector(&self) -> Vector3 {
        Vector3::from(self.accel)
    }
}
