//! The 12-state surprise Kalman filter and its building blocks.
//!
//! - **Parameters** (`params`): noise ratios and time constants
//! - **Calibration** (`calibration`): posture, gravity and noise scales from a
//!   resting window
//! - **Control linearization** (`control`): state-dependent M/M_in/E matrices
//! - **System matrices** (`system`): F, H, Q, R
//! - **Riccati solve** (`riccati`): steady-state covariance by fixed iteration
//! - **Filter state** (`state`): the carried x, P, M, M_in, E
//! - **Filter** (`kalman`): predict, update and surprise per sample

pub mod calibration;
pub mod control;
pub mod kalman;
pub mod params;
pub mod riccati;
pub mod state;
pub mod system;

pub use calibration::{Calibration, NoiseScales};
pub use control::{compute_control_matrix, disturbance_matrix};
pub use kalman::SurpriseKalmanFilter;
pub use params::FilterParams;
pub use riccati::steady_state_covariance;
pub use state::FilterState;
pub use system::SystemMatrices;
