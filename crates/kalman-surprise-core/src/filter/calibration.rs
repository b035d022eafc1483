//! Posture calibration from a resting window.
//!
//! The mean acceleration over the first `mean_range` samples is taken as the
//! gravity reaction in sensor coordinates. Roll and pitch follow from it, and
//! the gravity magnitude is the z component of the posture after rotating it
//! back to level.

use crate::error::{Error, Result};
use crate::math::{atan2, cos, sin, sqrt};
use crate::types::{ImuSample, Matrix3, Vector3};

use super::FilterParams;

/// Result of posture calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct Calibration {
    /// Mean acceleration over the calibration window.
    pub posture: [f64; 3],
    /// Roll angle (rad), `atan2(ay, az)`.
    pub roll: f64,
    /// Pitch angle (rad), `atan2(−ax, √(ay² + az²))`.
    pub pitch: f64,
    /// Gravity magnitude in accel units.
    pub gravity: f64,
    /// Number of samples actually averaged.
    pub samples_used: usize,
}

impl Calibration {
    /// Calibrate from the first `min(mean_range, window.len())` samples.
    pub fn from_window(window: &[ImuSample], mean_range: usize) -> Result<Self> {
        let count = mean_range.min(window.len());
        if count == 0 {
            return Err(Error::EmptyCalibration);
        }

        let sum = window[..count]
            .iter()
            .fold(Vector3::zeros(), |acc, s| acc + s.accel_vector());
        let posture = sum / count as f64;

        let roll = atan2(posture.y, posture.z);
        let pitch = atan2(-posture.x, sqrt(posture.y * posture.y + posture.z * posture.z));

        let gravity = (leveling_rotation(roll, pitch) * posture).z;

        Ok(Self {
            posture: posture.into(),
            roll,
            pitch,
            gravity,
            samples_used: count,
        })
    }

    /// Initial gravity-direction estimate for state indices 6..9.
    pub fn gravity_estimate(&self) -> Vector3 {
        let g = self.gravity;
        Vector3::new(g * sin(-self.pitch), g * sin(self.roll), g * cos(-self.pitch))
    }

    /// Noise standard deviations scaled by the calibrated gravity.
    pub fn noise_scales(&self, params: &FilterParams) -> NoiseScales {
        let g = self.gravity;
        NoiseScales {
            sigma_omega: params.sigma_omega,
            sigma_a: params.accel_noise_ratio * g,
            sigma_az: params.accel_noise_ratio * g,
            sigma_g: params.gravity_noise_ratio * g,
            sigma_v: params.sigma_v,
            sigma_f: params.observation_noise_ratio * g,
        }
    }
}

/// `R_pitch · R_roll`.
fn leveling_rotation(roll: f64, pitch: f64) -> Matrix3 {
    let (sp, cp) = (sin(pitch), cos(pitch));
    let (sr, cr) = (sin(roll), cos(roll));

    #[rustfmt::skip]
    let r_pitch = Matrix3::new(
        cp,  0.0, sp,
        0.0, 1.0, 0.0,
        -sp, 0.0, cp,
    );
    #[rustfmt::skip]
    let r_roll = Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, cr,  -sr,
        0.0, sr,  cr,
    );

    r_pitch * r_roll
}

/// Noise standard deviations after calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
pub struct NoiseScales {
    /// Angular-rate input noise σω.
    pub sigma_omega: f64,
    /// Horizontal acceleration input noise σA.
    pub sigma_a: f64,
    /// Vertical acceleration input noise σAz.
    pub sigma_az: f64,
    /// Gravity drift input noise σG.
    pub sigma_g: f64,
    /// Perceived angular-rate observation noise σV.
    pub sigma_v: f64,
    /// Acceleration observation noise σF.
    pub sigma_f: f64,
}
