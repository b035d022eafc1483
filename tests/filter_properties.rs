//! Lifecycle, determinism and numerical properties of the filter.

use kalman_surprise_core::matrix;
use kalman_surprise::{Error, FilterParams, ImuSample, SurpriseKalmanFilter};

const DT: f64 = 0.01;

fn resting(n: usize) -> Vec<ImuSample> {
    (0..n)
        .map(|i| ImuSample::new(i as f64 * DT, [0.0; 3], [0.0, 0.0, 9.8]))
        .collect()
}

/// A deterministic, mildly exciting stream: slow sway plus a vertical bump.
fn sway(n: usize) -> Vec<ImuSample> {
    (0..n)
        .map(|i| {
            let t = i as f64 * DT;
            let w = (t * 3.0).sin() * 0.4;
            let bump = if (200..210).contains(&i) { 3.0 } else { 0.0 };
            ImuSample::new(
                t,
                [w, 0.5 * w, -0.2 * w],
                [0.3 * w, -0.2 * w, 9.8 + bump],
            )
        })
        .collect()
}

// =============================================================================
// LIFECYCLE
// =============================================================================

#[test]
fn process_before_initialize_is_rejected() {
    let mut filter = SurpriseKalmanFilter::new(DT, 50);
    assert_eq!(
        filter.process(&ImuSample::new(0.0, [0.0; 3], [0.0, 0.0, 9.8])),
        Err(Error::UninitializedFilter)
    );
    assert!(filter.surprise_history().is_empty());
    assert!(filter.state().is_none());
    assert!(filter.covariance().is_none());
    assert!(filter.system().is_none());
}

#[test]
fn empty_calibration_is_rejected() {
    let mut filter = SurpriseKalmanFilter::new(DT, 50);
    assert_eq!(filter.initialize(&[]).err(), Some(Error::EmptyCalibration));

    let mut filter = SurpriseKalmanFilter::new(DT, 0);
    assert_eq!(filter.initialize(&resting(10)).err(), Some(Error::EmptyCalibration));
    assert!(!filter.is_initialized());
}

#[test]
fn reinitialize_starts_over() {
    let mut a = SurpriseKalmanFilter::new(DT, 50);
    a.initialize(&resting(50)).unwrap();
    for sample in &sway(100) {
        a.process(sample).unwrap();
    }
    a.initialize(&resting(50)).unwrap();

    let mut b = SurpriseKalmanFilter::new(DT, 50);
    b.initialize(&resting(50)).unwrap();

    assert!(a.surprise_history().is_empty());
    assert_eq!(a.filter_state(), b.filter_state());
    assert_eq!(a.vestibular(), b.vestibular());
}

// =============================================================================
// DETERMINISM
// =============================================================================

#[test]
fn independent_instances_agree() {
    let stream = sway(400);
    let run = || {
        let mut filter = SurpriseKalmanFilter::new(DT, 50);
        filter.initialize(&resting(50)).unwrap();
        stream
            .iter()
            .map(|s| filter.process(s).unwrap())
            .collect::<Vec<_>>()
    };

    let first = run();
    let second = run();
    assert_eq!(first.len(), second.len());
    for (i, (a, b)) in first.iter().zip(&second).enumerate() {
        assert!((a - b).abs() <= 1e-12 * a.abs().max(1.0), "sample {}: {} vs {}", i, a, b);
    }
}

// =============================================================================
// NUMERICS
// =============================================================================

#[test]
fn covariance_stays_symmetric() {
    let mut filter = SurpriseKalmanFilter::new(DT, 50);
    filter.initialize(&resting(50)).unwrap();
    for sample in &sway(300) {
        filter.process(sample).unwrap();
    }

    let p = filter.covariance().unwrap();
    let scale = p.abs().max();
    let asymmetry = (p - p.transpose()).abs().max();
    assert!(
        asymmetry <= 1e-8 * scale,
        "asymmetry {} relative to scale {}",
        asymmetry,
        scale
    );

    let gravity_block = p.fixed_view::<3, 3>(6, 6).into_owned();
    assert!(matrix::determinant3x3(&gravity_block) > 0.0);
}

#[test]
fn custom_time_constants_change_vestibular_response() {
    let params = FilterParams {
        tau_d: 2.0,
        ..FilterParams::default()
    };
    let fast = SurpriseKalmanFilter::with_params(DT, 50, params);
    let default = SurpriseKalmanFilter::new(DT, 50);
    assert_ne!(
        fast.vestibular().coefficients(),
        default.vestibular().coefficients()
    );
}

#[test]
fn sample_and_component_entry_points_agree() {
    let mut by_sample = SurpriseKalmanFilter::new(DT, 50);
    let mut by_component = SurpriseKalmanFilter::new(DT, 50);
    by_sample.initialize(&resting(50)).unwrap();
    by_component.initialize(&resting(50)).unwrap();

    for sample in &sway(250) {
        let [gx, gy, gz] = sample.gyro;
        let [ax, ay, az] = sample.accel;
        let a = by_sample.process(sample).unwrap();
        let b = by_component
            .process_sample(sample.time, gx, gy, gz, ax, ay, az)
            .unwrap();
        assert_eq!(a, b, "t = {}", sample.time);
    }
    assert_eq!(by_sample.filter_state(), by_component.filter_state());
}
