//! Dimensions and tuning constants used throughout the crate.

/// Number of filter states: `[ω(3) | gyro bias(3) | gravity(3) | linear accel(3)]`.
pub const STATE_DIM: usize = 12;

/// Number of observations: perceived angular rate (3) and raw acceleration (3).
pub const OBS_DIM: usize = 6;

/// Number of exogenous inputs: `[gx, gy, gz, ax, ay, az, 0]`.
pub const INPUT_DIM: usize = 7;

/// Number of rotational axes driven through the vestibular channel.
pub const AXES: usize = 3;

/// First state index of the gravity-direction block.
pub const GRAVITY_OFFSET: usize = 6;

/// Size of the gravity-direction block. Also the `k` of the KL divergence.
pub const GRAVITY_BLOCK_DIM: usize = 3;

/// First state index of the gyro-bias block.
pub const BIAS_OFFSET: usize = 3;

/// First state index of the linear-acceleration block.
pub const LINEAR_ACCEL_OFFSET: usize = 9;

/// Pivot/determinant magnitude below which a matrix is treated as singular.
pub const SINGULARITY_EPSILON: f64 = 1e-12;

// =============================================================================
// Default tuning (see `FilterParams`)
// =============================================================================

/// Default angular-rate input noise σω (rad/s).
pub const DEFAULT_SIGMA_OMEGA: f64 = 0.7;

/// Default perceived angular-rate observation noise σV (rad/s).
pub const DEFAULT_SIGMA_V: f64 = 0.175;

/// Default acceleration input noise as a fraction of calibrated gravity (σA, σAz).
pub const DEFAULT_ACCEL_NOISE_RATIO: f64 = 0.3;

/// Default gravity-drift input noise as a fraction of calibrated gravity (σG).
pub const DEFAULT_GRAVITY_NOISE_RATIO: f64 = 1e-4;

/// Default acceleration observation noise as a fraction of calibrated gravity (σF).
pub const DEFAULT_OBSERVATION_NOISE_RATIO: f64 = 0.002;

/// Default vestibular fast time constant τd (seconds).
pub const DEFAULT_TAU_D: f64 = 7.0;

/// Default vestibular adaptation time constant τa (seconds).
pub const DEFAULT_TAU_A: f64 = 190.0;

/// Default gyro-bias leak time constant tc (seconds).
pub const DEFAULT_TAU_C: f64 = 4.0;

/// Default number of steady-state Riccati iterations.
pub const DEFAULT_RICCATI_ITERATIONS: usize = 100;
