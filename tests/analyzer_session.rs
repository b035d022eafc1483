//! Analyzer sessions over synthetic streams.

use kalman_surprise::{
    log_surprise, AnalyzerError, Config, Error, FailurePolicy, ImuSample, SurpriseAnalyzer,
};

const DT: f64 = 0.01;

fn stream(n: usize, offset: usize, accel: [f64; 3]) -> Vec<ImuSample> {
    (0..n)
        .map(|i| ImuSample::new((offset + i) as f64 * DT, [0.0; 3], accel))
        .collect()
}

#[test]
fn calibrate_run_and_summarize() {
    let mut analyzer = SurpriseAnalyzer::new(Config::hundred_hz());
    let calibration = analyzer.calibrate(&stream(50, 0, [0.0, 0.0, 9.8])).unwrap();
    assert!((calibration.gravity - 9.8).abs() < 1e-9);

    let quiet = analyzer.run(&stream(300, 50, [0.0, 0.0, 9.8])).unwrap();
    assert_eq!(quiet.processed, 300);

    // A second run keeps appending to the same history.
    let mut jolt = stream(20, 350, [0.0, 0.0, 9.8]);
    for sample in jolt.iter_mut().take(5) {
        sample.accel = [2.0, -1.0, 6.0];
    }
    let jolted = analyzer.run(&jolt).unwrap();
    assert_eq!(jolted.processed, 20);
    assert_eq!(analyzer.surprise_history().len(), 320);
    assert!(
        jolted.mean_log_surprise > quiet.mean_log_surprise,
        "jolt {} should exceed quiet {}",
        jolted.mean_log_surprise,
        quiet.mean_log_surprise
    );

    let report = analyzer.summarize(&[250..300, 300..320]);
    assert_eq!(report.segments.len(), 2);
    assert!(report.segments[1].mean_log_surprise > report.segments[0].mean_log_surprise);
    let expected = (report.segments[0].mean_log_surprise + report.segments[1].mean_log_surprise) / 2.0;
    assert!((report.overall_mean - expected).abs() < 1e-15);

    let manual: f64 = analyzer.surprise_history()[300..320]
        .iter()
        .map(|&s| log_surprise(s))
        .sum::<f64>()
        / 20.0;
    assert!((report.segments[1].mean_log_surprise - manual).abs() < 1e-15);
}

#[test]
fn abort_reports_failing_index() {
    let mut analyzer = SurpriseAnalyzer::new(Config::hundred_hz());
    let err = analyzer.run(&stream(5, 0, [0.0, 0.0, 9.8])).unwrap_err();
    assert_eq!(
        err,
        AnalyzerError::Sample {
            index: 0,
            source: Error::UninitializedFilter,
        }
    );
    assert_eq!(analyzer.samples_seen(), 1);
}

#[test]
fn zero_gravity_calibration_fails() {
    let mut analyzer = SurpriseAnalyzer::new(Config::hundred_hz());
    let err = analyzer.calibrate(&stream(50, 0, [0.0; 3])).unwrap_err();
    assert!(
        matches!(err, AnalyzerError::Calibration(Error::SingularMatrix { .. })),
        "{:?}",
        err
    );
}

#[test]
fn skip_policy_counts_and_continues() {
    let config = Config::hundred_hz().failure_policy(FailurePolicy::SkipSample);
    let mut analyzer = SurpriseAnalyzer::new(config);

    assert_eq!(analyzer.push(&stream(1, 0, [0.0, 0.0, 9.8])[0]), Ok(None));
    analyzer.calibrate(&stream(50, 0, [0.0, 0.0, 9.8])).unwrap();

    let summary = analyzer.run(&stream(10, 50, [0.0, 0.0, 9.8])).unwrap();
    assert_eq!(summary.processed, 10);
    assert_eq!(summary.skipped, 0);
    assert_eq!(analyzer.skipped(), 0);
}

#[test]
fn g_unit_calibration_keeps_means_finite() {
    // With gravity ≈ 1 the gravity-block determinant falls below the
    // pseudo-inverse threshold and surprises drop under -1.
    let mut analyzer = SurpriseAnalyzer::new(Config::hundred_hz());
    analyzer.calibrate(&stream(50, 0, [0.0, 0.0, 1.0])).unwrap();

    let summary = analyzer.run(&stream(20, 50, [0.0, 0.0, 1.0])).unwrap();
    assert_eq!(summary.processed, 20);
    assert!(summary.non_finite > 0, "{:?}", summary);
    assert!(summary.mean_log_surprise.is_finite(), "{:?}", summary);

    let report = analyzer.summarize(&[0..20]);
    assert!(report.overall_mean.is_finite(), "{:?}", report);
    assert_eq!(report.segments[0].non_finite, summary.non_finite);
}
