//! Surprise Kalman filter: calibration, predict, update and scoring.
//!
//! The filter has two states. A freshly constructed filter is uninitialized
//! and rejects samples with [`Error::UninitializedFilter`]. [`initialize`]
//! calibrates posture from a resting window, builds the system matrices and
//! solves for the steady-state covariance; from then on every
//! [`process_sample`] runs one predict/update cycle and returns the Bayesian
//! surprise of the gravity block.
//!
//! [`initialize`]: SurpriseKalmanFilter::initialize
//! [`process_sample`]: SurpriseKalmanFilter::process_sample

use alloc::vec::Vec;

use crate::constants::{OBS_DIM, STATE_DIM};
use crate::error::{Error, Result};
use crate::matrix::{from_dynamic, inverse_fixed, to_dynamic};
use crate::surprise::bayesian_surprise;
use crate::types::{ImuSample, Matrix12, Vector12, Vector3, Vector6, Vector7};
use crate::vestibular::VestibularChannel;

use super::calibration::Calibration;
use super::control::{compute_control_matrix, disturbance_matrix};
use super::params::FilterParams;
use super::riccati::steady_state_covariance;
use super::state::FilterState;
use super::system::SystemMatrices;

/// Everything that exists only once the filter is calibrated.
#[derive(Debug, Clone)]
struct Engaged {
    calibration: Calibration,
    system: SystemMatrices,
    state: FilterState,
}

/// Vestibular-augmented Kalman filter that scores each update by its
/// Bayesian surprise.
///
/// State layout: `[ω(3) | gyro bias(3) | gravity(3) | linear accel(3)]`.
/// Observations: vestibular-perceived angular rate and raw acceleration.
///
/// Not internally synchronized; `process_sample` takes `&mut self`.
#[derive(Debug, Clone)]
pub struct SurpriseKalmanFilter {
    dt: f64,
    mean_range: usize,
    params: FilterParams,
    vestibular: VestibularChannel,
    engaged: Option<Engaged>,
    history: Vec<f64>,
    last_time: Option<f64>,
}

impl SurpriseKalmanFilter {
    /// Create an uninitialized filter with default tuning.
    ///
    /// `dt` is the fixed sample period in seconds, `mean_range` the number of
    /// calibration samples averaged by [`initialize`](Self::initialize).
    pub fn new(dt: f64, mean_range: usize) -> Self {
        Self::with_params(dt, mean_range, FilterParams::default())
    }

    /// Create an uninitialized filter with explicit tuning.
    pub fn with_params(dt: f64, mean_range: usize, params: FilterParams) -> Self {
        Self {
            dt,
            mean_range,
            params,
            vestibular: VestibularChannel::from_time_constants(params.tau_d, params.tau_a, dt),
            engaged: None,
            history: Vec::new(),
            last_time: None,
        }
    }

    /// Calibrate and build the model.
    ///
    /// 1. Posture, roll, pitch and gravity from the first
    ///    `min(mean_range, len)` samples
    /// 2. Noise scales from gravity
    /// 3. Gravity block of the state from roll and pitch
    /// 4. F, H, M, M_in, E, Q, R
    /// 5. Steady-state covariance by fixed Riccati iteration
    ///
    /// Calling this on an already initialized filter starts over: the
    /// vestibular memory and the surprise history are cleared. On error the
    /// filter is left untouched.
    pub fn initialize(&mut self, calibration_window: &[ImuSample]) -> Result<&Calibration> {
        let calibration = Calibration::from_window(calibration_window, self.mean_range)?;
        let noise = calibration.noise_scales(&self.params);
        let gravity = calibration.gravity_estimate();

        let bias_gain = self.params.bias_gain(self.dt);
        let control = compute_control_matrix(&gravity, self.dt, bias_gain);
        let system = SystemMatrices::new(
            &noise,
            &disturbance_matrix(&control),
            self.params.bias_retention(self.dt),
        );

        let steady = steady_state_covariance(
            &to_dynamic(&system.f),
            &to_dynamic(&system.h),
            &to_dynamic(&system.q),
            &to_dynamic(&system.r),
            self.params.riccati_iterations,
        )?;
        let covariance: Matrix12 = from_dynamic::<STATE_DIM, STATE_DIM>(&steady)?;

        let state = FilterState::new(&gravity, covariance, self.dt, bias_gain);

        self.vestibular.reset();
        self.history.clear();
        self.last_time = None;
        let engaged = self.engaged.insert(Engaged {
            calibration,
            system,
            state,
        });
        Ok(&engaged.calibration)
    }

    /// Run one predict/update cycle and return the surprise of this sample.
    ///
    /// Gyro in rad/s, accel in calibration units. Fails with
    /// [`Error::UninitializedFilter`] before [`initialize`](Self::initialize)
    /// and with [`Error::SingularMatrix`] if the innovation covariance cannot
    /// be inverted. A failed call does not change the filter.
    #[allow(clippy::too_many_arguments)]
    pub fn process_sample(
        &mut self,
        time: f64,
        gx: f64,
        gy: f64,
        gz: f64,
        ax: f64,
        ay: f64,
        az: f64,
    ) -> Result<f64> {
        self.advance(time, Vector3::new(gx, gy, gz), Vector3::new(ax, ay, az))
    }

    /// [`process_sample`](Self::process_sample) for an [`ImuSample`].
    pub fn process(&mut self, sample: &ImuSample) -> Result<f64> {
        self.advance(sample.time, sample.gyro_vector(), sample.accel_vector())
    }

    fn advance(&mut self, time: f64, gyro: Vector3, accel: Vector3) -> Result<f64> {
        let engaged = self.engaged.as_mut().ok_or(Error::UninitializedFilter)?;

        let mut vestibular = self.vestibular;
        let mut state = engaged.state.clone();
        let surprise = step(
            &engaged.system,
            &mut state,
            &mut vestibular,
            self.dt,
            self.params.bias_gain(self.dt),
            gyro,
            accel,
        )?;

        engaged.state = state;
        self.vestibular = vestibular;
        self.history.push(surprise);
        self.last_time = Some(time);
        Ok(surprise)
    }

    /// Whether [`initialize`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        self.engaged.is_some()
    }

    /// Sample period in seconds.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Calibration window length.
    pub fn mean_range(&self) -> usize {
        self.mean_range
    }

    /// Tuning parameters.
    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    /// Calibration result, once initialized.
    pub fn calibration(&self) -> Option<&Calibration> {
        self.engaged.as_ref().map(|e| &e.calibration)
    }

    /// Calibrated gravity magnitude, once initialized.
    pub fn gravity(&self) -> Option<f64> {
        self.calibration().map(|c| c.gravity)
    }

    /// Carried filter state, once initialized.
    pub fn filter_state(&self) -> Option<&FilterState> {
        self.engaged.as_ref().map(|e| &e.state)
    }

    /// Posterior state estimate, once initialized.
    pub fn state(&self) -> Option<&Vector12> {
        self.filter_state().map(|s| &s.x)
    }

    /// Posterior covariance, once initialized.
    pub fn covariance(&self) -> Option<&Matrix12> {
        self.filter_state().map(|s| &s.p)
    }

    /// Current gravity-direction estimate (state indices 6..9).
    pub fn gravity_estimate(&self) -> Option<Vector3> {
        self.filter_state().map(FilterState::gravity)
    }

    /// Fixed system matrices, once initialized.
    pub fn system(&self) -> Option<&SystemMatrices> {
        self.engaged.as_ref().map(|e| &e.system)
    }

    /// Vestibular channel memory.
    pub fn vestibular(&self) -> &VestibularChannel {
        &self.vestibular
    }

    /// Surprise of every processed sample, in order.
    pub fn surprise_history(&self) -> &[f64] {
        &self.history
    }

    /// Timestamp of the last successfully processed sample.
    pub fn last_time(&self) -> Option<f64> {
        self.last_time
    }
}

/// One predict/update cycle on `state`.
///
/// The auxiliary trajectory absorbs the input through `E`; the posterior
/// prediction is `F·x` alone, so all new information enters via the update.
fn step(
    system: &SystemMatrices,
    state: &mut FilterState,
    vestibular: &mut VestibularChannel,
    dt: f64,
    bias_gain: f64,
    gyro: Vector3,
    accel: Vector3,
) -> Result<f64> {
    state.x_prev = state.x;

    let perceived = vestibular.update([gyro.x, gyro.y, gyro.z]);
    let z = Vector6::new(
        perceived[0],
        perceived[1],
        perceived[2],
        accel.x,
        accel.y,
        accel.z,
    );
    let input = Vector7::from([gyro.x, gyro.y, gyro.z, accel.x, accel.y, accel.z, 0.0]);
    let idle = Vector7::zeros();

    // Predict
    let fx = system.f * state.x;
    state.x_aux = fx + state.m * idle + state.e * input;
    state.x = fx + state.m_in * idle;
    state.p_prev = state.p;
    state.p = system.f * state.p * system.f.transpose() + system.q;

    // Update
    let ht = system.h.transpose();
    let innovation_cov = system.h * state.p * ht + system.r;
    let gain = state.p * ht * inverse_fixed::<OBS_DIM>(&innovation_cov)?;
    let innovation = z - system.h * state.x;
    state.x += gain * innovation;
    state.p = (Matrix12::identity() - gain * system.h) * state.p;
    state.relinearize(dt, bias_gain);

    Ok(bayesian_surprise(&state.x_prev, &state.p_prev, &state.x, &state.p))
}
