//! Signal comparison metrics.
//!
//! - **Normalized RMS error**: `20 log10(rms(wdf - ref) / rms(ref))`. -60 dB
//!   means the error is 0.1% of the signal.
//! - **Peak error**: `20 log10(max|wdf - ref| / max|ref|)`.

use serde::{Deserialize, Serialize};

/// Floor reported when two signals are bit-identical.
pub const EXACT_MATCH_DB: f64 = -400.0;

pub fn normalized_rms_error_db(wdf: &[f64], reference: &[f64]) -> f64 {
    let n = wdf.len().min(reference.len());
    if n == 0 {
        return f64::NEG_INFINITY;
    }
    let mut err_sum = 0.0;
    let mut ref_sum = 0.0;
    for (w, r) in wdf[..n].iter().zip(&reference[..n]) {
        err_sum += (w - r) * (w - r);
        ref_sum += r * r;
    }
    ratio_db(err_sum.sqrt(), ref_sum.sqrt())
}

pub fn peak_error_db(wdf: &[f64], reference: &[f64]) -> f64 {
    let n = wdf.len().min(reference.len());
    if n == 0 {
        return f64::NEG_INFINITY;
    }
    let err = wdf[..n]
        .iter()
        .zip(&reference[..n])
        .fold(0.0_f64, |m, (w, r)| m.max((w - r).abs()));
    let peak = reference[..n].iter().fold(0.0_f64, |m, r| m.max(r.abs()));
    ratio_db(err, peak)
}

fn ratio_db(num: f64, den: f64) -> f64 {
    if num == 0.0 {
        EXACT_MATCH_DB
    } else if den == 0.0 {
        f64::INFINITY
    } else {
        (20.0 * (num / den).log10()).max(EXACT_MATCH_DB)
    }
}

/// Peak level in dB of the second half of `signal`.
pub fn steady_state_level_db(signal: &[f64]) -> f64 {
    let tail = &signal[signal.len() / 2..];
    let peak = tail.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
    20.0 * peak.max(1e-12).log10()
}

/// Pass thresholds. `None` skips a metric.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PassCriteria {
    #[serde(default)]
    pub normalized_rms_error_db: Option<f64>,
    #[serde(default)]
    pub peak_error_db: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub normalized_rms_error_db: f64,
    pub peak_error_db: f64,
}

impl ComparisonResult {
    pub fn passes(&self, criteria: &PassCriteria) -> bool {
        let rms_ok = criteria
            .normalized_rms_error_db
            .map_or(true, |t| self.normalized_rms_error_db <= t);
        let peak_ok = criteria
            .peak_error_db
            .map_or(true, |t| self.peak_error_db <= t);
        rms_ok && peak_ok
    }
}

pub fn compare(wdf: &[f64], reference: &[f64]) -> ComparisonResult {
    ComparisonResult {
        normalized_rms_error_db: normalized_rms_error_db(wdf, reference),
        peak_error_db: peak_error_db(wdf, reference),
    }
}
