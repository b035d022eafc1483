//! Configuration for a surprise analysis session.

use kalman_surprise_core::FilterParams;

/// What the analyzer does when a single sample cannot be processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum FailurePolicy {
    /// Stop the run and return the error with the sample index.
    #[default]
    Abort,

    /// Leave the filter as it was, count the sample as skipped and continue.
    SkipSample,
}

/// Configuration options for [`SurpriseAnalyzer`](crate::SurpriseAnalyzer).
///
/// The sample period and calibration window length have no sensible
/// defaults and are taken by [`Config::new`]; everything else has a default
/// and a builder method.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Fixed sample period in seconds.
    pub dt: f64,

    /// Number of leading samples averaged to calibrate posture.
    pub mean_range: usize,

    /// Noise ratios, time constants and Riccati iteration count.
    #[serde(default)]
    pub params: FilterParams,

    /// Behavior on a failing sample. Default: [`FailurePolicy::Abort`].
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Emit a `debug!` progress line every `log_every` samples.
    ///
    /// Default: 0 (off).
    #[serde(default)]
    pub log_every: usize,
}

impl Config {
    /// Create a configuration for the given sample period and calibration
    /// window length.
    ///
    /// # Panics
    ///
    /// Panics if `dt` is not a finite positive number or `mean_range` is 0.
    pub fn new(dt: f64, mean_range: usize) -> Self {
        assert!(dt.is_finite() && dt > 0.0, "dt must be finite and > 0");
        assert!(mean_range > 0, "mean_range must be > 0");
        Self {
            dt,
            mean_range,
            params: FilterParams::default(),
            failure_policy: FailurePolicy::default(),
            log_every: 0,
        }
    }

    /// 100 Hz sampling with a half-second calibration window.
    pub fn hundred_hz() -> Self {
        Self::new(0.01, 50)
    }

    // =========================================================================
    // Builder methods
    // =========================================================================

    /// Set the filter tuning.
    ///
    /// # Panics
    ///
    /// Panics if any noise scale or time constant is not finite and positive.
    pub fn params(mut self, params: FilterParams) -> Self {
        if let Err(msg) = validate_params(&params) {
            panic!("{}", msg);
        }
        self.params = params;
        self
    }

    /// Set the failure policy.
    pub fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Log progress every `n` samples (0 disables).
    pub fn log_every(mut self, n: usize) -> Self {
        self.log_every = n;
        self
    }

    /// Sampling rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        1.0 / self.dt
    }

    /// Check if the configuration is valid.
    ///
    /// Builder methods already enforce these rules; this catches values
    /// written directly to the public fields or deserialized.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err("dt must be finite and > 0".to_string());
        }
        if self.mean_range == 0 {
            return Err("mean_range must be > 0".to_string());
        }
        validate_params(&self.params)
    }
}

fn validate_params(params: &FilterParams) -> Result<(), String> {
    let positive = [
        ("sigma_omega", params.sigma_omega),
        ("sigma_v", params.sigma_v),
        ("accel_noise_ratio", params.accel_noise_ratio),
        ("gravity_noise_ratio", params.gravity_noise_ratio),
        ("observation_noise_ratio", params.observation_noise_ratio),
        ("tau_d", params.tau_d),
        ("tau_a", params.tau_a),
        ("tau_c", params.tau_c),
    ];
    for (name, value) in positive {
        if !(value.is_finite() && value > 0.0) {
            return Err(format!("{} must be finite and > 0", name));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_config() {
        let config = Config::new(0.005, 200);
        assert_eq!(config.dt, 0.005);
        assert_eq!(config.mean_range, 200);
        assert_eq!(config.params, FilterParams::default());
        assert_eq!(config.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.log_every, 0);
        assert_eq!(config.sample_rate(), 200.0);
    }

    #[test]
    fn test_builder_methods() {
        let params = FilterParams {
            sigma_omega: 0.5,
            riccati_iterations: 200,
            ..FilterParams::default()
        };
        let config = Config::hundred_hz()
            .params(params)
            .failure_policy(FailurePolicy::SkipSample)
            .log_every(1_000);

        assert_eq!(config.params.sigma_omega, 0.5);
        assert_eq!(config.params.riccati_iterations, 200);
        assert_eq!(config.failure_policy, FailurePolicy::SkipSample);
        assert_eq!(config.log_every, 1_000);
    }

    #[test]
    fn test_validation() {
        assert!(Config::hundred_hz().validate().is_ok());

        let mut invalid = Config::hundred_hz();
        invalid.dt = f64::NAN;
        assert!(invalid.validate().is_err());

        let mut invalid = Config::hundred_hz();
        invalid.mean_range = 0;
        assert!(invalid.validate().is_err());

        let mut invalid = Config::hundred_hz();
        invalid.params.tau_c = 0.0;
        assert_eq!(
            invalid.validate(),
            Err("tau_c must be finite and > 0".to_string())
        );
    }

    #[test]
    #[should_panic(expected = "dt must be finite and > 0")]
    fn test_zero_dt_panics() {
        Config::new(0.0, 50);
    }

    #[test]
    #[should_panic(expected = "sigma_v must be finite and > 0")]
    fn test_invalid_params_panic() {
        Config::hundred_hz().params(FilterParams {
            sigma_v: -1.0,
            ..FilterParams::default()
        });
    }
}
