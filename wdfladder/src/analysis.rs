//! Steady-state response measurement by sine excitation.

use crate::AudioProcessor;
use std::f64::consts::PI;

/// Peak output amplitude for a unit sine at `freq`, measured over the
/// second half of `duration_s` seconds after a reset.
pub fn sine_gain(
    processor: &mut impl AudioProcessor,
    freq: f64,
    sample_rate: f64,
    duration_s: f64,
) -> f64 {
    processor.reset(sample_rate);
    let n = (duration_s * sample_rate) as usize;
    let settle = n / 2;
    let mut peak: f64 = 0.0;
    for i in 0..n {
        let x = (2.0 * PI * freq * i as f64 / sample_rate).sin();
        let y = processor.process_sample(x);
        if i >= settle {
            peak = peak.max(y.abs());
        }
    }
    peak
}

pub fn gain_db(gain: f64) -> f64 {
    20.0 * gain.max(1e-12).log10()
}

/// `count` log-spaced frequencies from `lo` to `hi` inclusive.
pub fn log_frequencies(lo: f64, hi: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let ratio = (hi / lo).ln();
            (0..count)
                .map(|i| lo * (ratio * i as f64 / (count - 1) as f64).exp())
                .collect()
        }
    }
}

/// `(frequency, gain dB)` for each frequency, resetting between points.
pub fn magnitude_response_db(
    processor: &mut impl AudioProcessor,
    freqs: &[f64],
    sample_rate: f64,
) -> Vec<(f64, f64)> {
    freqs
        .iter()
        .map(|&f| {
            // At least 20 periods of the lowest frequencies.
            let duration = (20.0 / f).max(0.25);
            (f, gain_db(sine_gain(processor, f, sample_rate, duration)))
        })
        .collect()
}
