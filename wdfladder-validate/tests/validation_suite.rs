//! Runs the WDF filters against their bilinear references end to end.

use wdfladder::filters::{ButterLadderConfig, FilterKind, IdealRlcConfig};
use wdfladder::{AudioProcessor, WdfFilter, WdfParameters};
use wdfladder_validate::analytical;
use wdfladder_validate::metrics;
use wdfladder_validate::runner::{reference_prototype, RunnerError, ValidationRunner};
use wdfladder_validate::signals;
use wdfladder_validate::ValidationConfig;

const FS: f64 = 48_000.0;

fn built(kind: FilterKind, fc: f64, q: f64) -> WdfFilter {
    let mut filter =
        WdfFilter::build(kind, IdealRlcConfig::default(), ButterLadderConfig::default()).unwrap();
    assert!(filter.reset(FS));
    filter.set_parameters(WdfParameters::new(fc, q)).unwrap();
    filter
}

fn impulse_error_db(kind: FilterKind, fc: f64, q: f64) -> f64 {
    let mut filter = built(kind, fc, q);
    let reference = reference_prototype(&filter).bilinear(FS);
    let input = signals::impulse(4096, 1.0);
    let out: Vec<f64> = input.iter().map(|&x| filter.process_sample(x)).collect();
    metrics::normalized_rms_error_db(&out, &reference.filter(&input))
}

#[test]
fn default_suite_passes() {
    let report = ValidationRunner::new(ValidationConfig::default_config()).run_all();
    for (name, case) in &report.cases {
        assert!(case.passed, "{name} failed: {case:?}");
    }
    assert!(report.all_passed());
}

#[test]
fn lowpass_highpass_and_ladder_match_to_rounding() {
    for kind in [
        FilterKind::IdealRlcLpf,
        FilterKind::IdealRlcHpf,
        FilterKind::ButterLpf3,
    ] {
        let err = impulse_error_db(kind, 1000.0, 0.707);
        assert!(err < -200.0, "{kind:?}: {err:.1} dB");
    }
}

#[test]
fn lc_pair_responses_track_reference() {
    for kind in [FilterKind::IdealRlcBpf, FilterKind::IdealRlcBsf] {
        let err = impulse_error_db(kind, 1000.0, 0.707);
        assert!(err < -45.0, "{kind:?}: {err:.1} dB");
        assert!(err > -200.0, "{kind:?} unexpectedly exact");
    }
}

#[test]
fn reference_polarity_follows_tap() {
    let filter = built(FilterKind::IdealRlcLpf, 1000.0, 0.707);
    let dc = reference_prototype(&filter).response(0.0).re;
    assert!((dc + 1.0).abs() < 1e-12);

    let filter = built(FilterKind::ButterLpf3, 1000.0, 0.707);
    let dc = reference_prototype(&filter).response(0.0).re;
    assert!((dc - 1.0).abs() < 1e-12);
}

#[test]
fn warped_reference_hits_corner() {
    let filter = built(FilterKind::IdealRlcLpf, 5000.0, 0.707);
    let digital = reference_prototype(&filter).bilinear(FS);
    let at_fc = digital.magnitude_db(5000.0, FS);
    assert!((at_fc - 20.0 * 0.707_f64.log10()).abs() < 0.01, "{at_fc}");
}

#[test]
fn butter_reference_matches_direct_formula() {
    let filter = built(FilterKind::ButterLpf3, 2000.0, 0.707);
    let WdfFilter::ButterLpf3(ladder) = &filter else {
        panic!("expected ladder");
    };
    let (l1, c1, l2) = ladder.component_values();
    let direct = analytical::butter_ladder(l1, c1, l2, 600.0, 600.0);
    assert_eq!(direct, reference_prototype(&filter));
}

#[test]
fn yaml_suite_runs_single_case() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("validate.yaml");
    std::fs::write(
        &path,
        r#"
global:
  sample_rate: 44100
  signal_length: 2048
cases:
  hpf_250:
    description: "high-pass at 250 Hz"
    kind: ideal_rlc_hpf
    parameters:
      fc: 250.0
      q: 1.2
    signals:
      - type: impulse
      - type: sine
        frequency: 250.0
    pass_criteria:
      normalized_rms_error_db: -120.0
"#,
    )
    .unwrap();
    let config = ValidationConfig::load(&path).unwrap();
    let runner = ValidationRunner::new(config);
    let result = runner.run_case("hpf_250").unwrap();
    assert!(result.passed, "{result:?}");
    assert_eq!(result.signals.len(), 2);
    assert_eq!(result.kind, "ideal_rlc_hpf");
}

#[test]
fn unknown_case_is_an_error() {
    let runner = ValidationRunner::new(ValidationConfig::default_config());
    assert!(matches!(
        runner.run_case("nope"),
        Err(RunnerError::UnknownCase(_))
    ));
}

#[test]
fn invalid_parameters_fail_the_case() {
    let mut config = ValidationConfig::default_config();
    config.cases.retain(|name, _| name == "lpf_1khz");
    if let Some(case) = config.cases.get_mut("lpf_1khz") {
        case.parameters.fc = 30_000.0;
    }
    let report = ValidationRunner::new(config).run_all();
    let case = &report.cases["lpf_1khz"];
    assert!(!case.passed);
    assert!(case.error.is_some());
    assert!(case.signals.is_empty());
    assert_eq!(report.summary.failed, 1);
}

#[test]
fn sine_level_at_corner_reflects_q() {
    let runner = ValidationRunner::new(ValidationConfig::default_config());
    let result = runner.run_case("lpf_100hz").unwrap();
    let sine = result
        .signals
        .iter()
        .find(|s| s.label.starts_with("sine"))
        .unwrap();
    // amplitude 0.5 through |H(fc)| = Q
    let expected = 20.0 * (0.5_f64 * 0.707).log10();
    assert!(
        (sine.level_db - expected).abs() < 0.2,
        "level {:.2} dB, expected {expected:.2}",
        sine.level_db
    );
}
