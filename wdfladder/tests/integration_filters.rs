//! Frequency- and time-domain behaviour of the filter assemblies.


use audio_analysis::*;
use wdfladder::filters::{
    ButterLadderConfig, ButterLpf3, IdealRlcConfig, IdealRlcFilter, RlcResponse,
};
use wdfladder::params::WdfParameters;
use wdfladder::AudioProcessor;

// ---------------------------------------------------------------------------
// Ideal RLC low-pass at 100 Hz
// ---------------------------------------------------------------------------

#[test]
fn lowpass_100hz_passband_corner_and_rolloff() {
    let make = || rlc(RlcResponse::Lowpass, 100.0, 0.707, true);

    let pass = gain_db_at(make, 25.0);
    assert!(pass.abs() < 0.5, "passband gain {pass:.3} dB");

    // Q = 0.707 puts the corner at -3 dB.
    let corner = gain_db_at(make, 100.0);
    assert!((corner + 3.01).abs() < 0.5, "gain at fc {corner:.3} dB");

    let g400 = gain_db_at(make, 400.0);
    let g800 = gain_db_at(make, 800.0);
    let g1600 = gain_db_at(make, 1600.0);
    for (lo, hi) in [(g400, g800), (g800, g1600)] {
        let slope = hi - lo;
        assert!(
            (slope + 12.0).abs() < 1.0,
            "rolloff {slope:.2} dB/oct (from {lo:.2} to {hi:.2})"
        );
    }
}

#[test]
fn lowpass_dc_settles_to_inverted_input() {
    // 0.5 x out2 compensates the open load: |y| = |x| at DC.
    let mut f = rlc(RlcResponse::Lowpass, 1000.0, 0.707, true);
    let out = process(&mut f, &vec![0.8; 20_000]);
    let y = *out.last().unwrap();
    assert!((y + 0.8).abs() < 1e-6, "dc output {y}");
}

// ---------------------------------------------------------------------------
// Other responses at 1 kHz
// ---------------------------------------------------------------------------

#[test]
fn highpass_mirrors_lowpass() {
    let make = || rlc(RlcResponse::Highpass, 1000.0, 0.707, true);
    let corner = gain_db_at(make, 1000.0);
    assert!((corner + 3.01).abs() < 0.3, "hpf at fc {corner:.3} dB");
    let stop = gain_db_at(make, 250.0);
    assert!(stop < -22.0, "hpf two octaves down {stop:.3} dB");
    let pass = gain_db_at(make, 4000.0);
    assert!(pass.abs() < 0.5, "hpf passband {pass:.3} dB");
}

#[test]
fn bandpass_peaks_at_center() {
    let make = || rlc(RlcResponse::Bandpass, 1000.0, 5.0, true);
    let center = gain_db_at(make, 1000.0);
    assert!(center.abs() < 0.3, "bpf center {center:.3} dB");
    for f in [500.0, 2000.0] {
        let g = gain_db_at(make, f);
        assert!(g < -15.0, "bpf at {f} Hz: {g:.3} dB");
    }
}

#[test]
fn bandstop_notches_center() {
    let make = || rlc(RlcResponse::Bandstop, 1000.0, 0.707, true);
    let notch = gain_db_at(make, 1000.0);
    assert!(notch < -60.0, "notch depth {notch:.1} dB");
    let low = gain_db_at(make, 250.0);
    let high = gain_db_at(make, 4000.0);
    assert!(low.abs() < 1.0 && high.abs() < 1.0, "bsf skirts {low:.2} / {high:.2} dB");
}

// ---------------------------------------------------------------------------
// Impulse response: ringing frequency and Q
// ---------------------------------------------------------------------------

#[test]
fn bandpass_impulse_rings_at_resonance() {
    let (fc, q) = (1000.0, 5.0);
    let mut f = rlc(RlcResponse::Bandpass, fc, q, false);

    let values = f.component_values();
    let f0 = 1.0 / (2.0 * std::f64::consts::PI * (values.inductance * values.capacitance).sqrt());
    let q0 = values.resistance.recip() * (values.inductance / values.capacitance).sqrt();
    assert!((f0 - fc).abs() < 1e-6 && (q0 - q).abs() < 1e-9);

    let y = process(&mut f, &impulse(4000));

    // Half a period between consecutive crossings.
    let zc = zero_crossings(&y);
    assert!(zc.len() > 40, "only {} zero crossings", zc.len());
    let period = (zc[21] - zc[1]) as f64 / 10.0;
    let ring = SAMPLE_RATE / period;
    assert!((ring - fc).abs() / fc < 0.02, "ringing at {ring:.1} Hz");

    // Envelope falls by exp(-π/Q) per period.
    let n = (SAMPLE_RATE / fc) as usize;
    let cycle_peak = |c: usize| peak(&y[c * n..(c + 1) * n]);
    let ratio = cycle_peak(12) / cycle_peak(2);
    let q_est = -10.0 * std::f64::consts::PI / ratio.ln();
    assert!((q_est - q).abs() / q < 0.1, "estimated Q {q_est:.3}");
}

// ---------------------------------------------------------------------------
// Parameter handling
// ---------------------------------------------------------------------------

#[test]
fn parameters_round_trip_exactly() {
    let mut f = IdealRlcFilter::lowpass().unwrap();
    f.reset(SAMPLE_RATE);
    let p = WdfParameters::new(1000.0, 0.707);
    f.set_parameters(p).unwrap();
    let back = f.parameters();
    assert_eq!(back.fc, 1000.0);
    assert_eq!(back.q, 0.707);
    assert_eq!(back, p);
}

#[test]
fn repeated_identical_parameters_are_a_no_op() {
    let p = WdfParameters::new(440.0, 2.0);
    let mut once = rlc(RlcResponse::Bandpass, p.fc, p.q, true);
    let mut twice = rlc(RlcResponse::Bandpass, p.fc, p.q, true);

    let input = sine(300.0, 1.0, 2048, SAMPLE_RATE);
    let _ = process(&mut once, &input[..1024]);
    let _ = process(&mut twice, &input[..1024]);

    let values = twice.component_values();
    assert!(!twice.set_parameters(p).unwrap());
    assert_eq!(twice.component_values(), values);

    // Mid-stream no-op: outputs stay bit-identical.
    let a = process(&mut once, &input[1024..]);
    let b = process(&mut twice, &input[1024..]);
    assert_eq!(a, b);
}

#[test]
fn changed_parameters_retune_mid_stream() {
    let mut f = rlc(RlcResponse::Lowpass, 200.0, 0.707, true);
    let _ = process(&mut f, &sine(100.0, 1.0, 512, SAMPLE_RATE));
    assert!(f.set_parameters(WdfParameters::new(2000.0, 0.707)).unwrap());
    assert!(f.tree().is_initialized());
    let out = process(&mut f, &sine(100.0, 1.0, 4096, SAMPLE_RATE));
    assert!(out.iter().all(|y| y.is_finite()));
}

#[test]
fn reset_below_applied_fc_forces_revalidation() {
    let p = WdfParameters::new(20_000.0, 0.707);

    let mut rlc_lpf = IdealRlcFilter::lowpass().unwrap();
    assert!(rlc_lpf.reset(96_000.0));
    assert!(rlc_lpf.set_parameters(p).unwrap());
    // 20 kHz is above Nyquist at 32 kHz: the old values stay loaded.
    assert!(rlc_lpf.reset(32_000.0));
    assert!(rlc_lpf.set_parameters(p).is_err());
    assert!(rlc_lpf.set_parameters(WdfParameters::new(10_000.0, 0.707)).unwrap());
    assert_eq!(rlc_lpf.parameters().fc, 10_000.0);

    let mut ladder = ButterLpf3::new(ButterLadderConfig::default()).unwrap();
    assert!(ladder.reset(96_000.0));
    assert!(ladder.set_parameters(p).unwrap());
    assert!(ladder.reset(32_000.0));
    assert!(ladder.set_parameters(p).is_err());
    assert!(ladder.set_parameters(WdfParameters::new(10_000.0, 0.707)).unwrap());

    let out = process(&mut ladder, &sine(1000.0, 1.0, 1024, 32_000.0));
    assert!(out.iter().all(|y| y.is_finite()));
}

// ---------------------------------------------------------------------------
// Underflow
// ---------------------------------------------------------------------------

#[test]
fn decayed_impulse_flushes_registers_to_exact_zero() {
    for response in [
        RlcResponse::Lowpass,
        RlcResponse::Highpass,
        RlcResponse::Bandpass,
        RlcResponse::Bandstop,
    ] {
        let mut f = IdealRlcFilter::new(response, IdealRlcConfig::default()).unwrap();
        f.reset(SAMPLE_RATE);
        let out = process(&mut f, &impulse(20_000));
        let tree = f.tree();
        assert!(
            tree.registers().all(|z| z == 0.0),
            "{response:?}: registers {:?}",
            tree.registers().collect::<Vec<_>>()
        );
        assert_eq!(*out.last().unwrap(), 0.0, "{response:?} output not flushed");
        assert!(out.iter().all(|y| *y == 0.0 || y.abs() >= 1.175494351e-38 / 2.0));
    }
}

// ---------------------------------------------------------------------------
// Butterworth ladder
// ---------------------------------------------------------------------------

#[test]
fn butterworth_third_order_response() {
    let make = || butter(1000.0, true);
    let pass = gain_db_at(make, 250.0);
    assert!(pass.abs() < 0.1, "passband {pass:.3} dB");
    let corner = gain_db_at(make, 1000.0);
    assert!((corner + 3.01).abs() < 0.2, "corner {corner:.3} dB");
    let octave = gain_db_at(make, 2000.0);
    assert!((octave + 18.26).abs() < 0.5, "one octave up {octave:.3} dB");
    let two = gain_db_at(make, 4000.0);
    assert!((two + 36.8).abs() < 1.0, "two octaves up {two:.3} dB");
}

#[test]
fn warping_pins_corner_near_nyquist() {
    let warped = gain_db_at(|| butter(10_000.0, true), 10_000.0);
    let plain = gain_db_at(|| butter(10_000.0, false), 10_000.0);
    assert!((warped + 3.01).abs() < 0.2, "warped corner {warped:.3} dB");
    assert!(plain < -5.0, "unwarped corner {plain:.3} dB");
}

#[test]
fn butterworth_ignores_q() {
    let mut a = butter(1000.0, true);
    let mut b = butter(1000.0, true);
    b.set_parameters(WdfParameters {
        q: 4.0,
        ..b.parameters()
    })
    .unwrap();
    let input = sine(700.0, 1.0, 1024, SAMPLE_RATE);
    assert_eq!(process(&mut a, &input), process(&mut b, &input));
}
