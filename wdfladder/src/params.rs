//! Filter parameters, numeric constants and the float-underflow clamp.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Smallest positive normal `f32`. Register values with a smaller magnitude
/// are flushed to zero so the recursion never walks into denormals.
pub const FLT_MIN_PLUS: f64 = 1.175494351e-38;
/// Negative counterpart of [`FLT_MIN_PLUS`].
pub const FLT_MIN_MINUS: f64 = -1.175494351e-38;

/// Effective resistance of an open-circuit load (Ω).
pub const OPEN_CIRCUIT_RESISTANCE: f64 = 1.0e34;
/// Substitute for a 0 Ω load on a parallel-terminated junction.
pub const SHORT_CIRCUIT_RESISTANCE: f64 = 1.0e-15;
/// Default source and terminal resistance of a fresh adaptor (Ω).
pub const DEFAULT_PORT_RESISTANCE: f64 = 600.0;

pub const DEFAULT_SAMPLE_RATE: f64 = 44_100.0;

/// Flush a value to exactly zero when it falls inside the denormal band.
///
/// Returns `true` when the value was clamped.
#[inline]
pub fn check_float_underflow(value: &mut f64) -> bool {
    if (*value > 0.0 && *value < FLT_MIN_PLUS) || (*value < 0.0 && *value > FLT_MIN_MINUS) {
        *value = 0.0;
        return true;
    }
    false
}

/// Bilinear pre-warped cutoff: `fc * tan(π fc / fs) / (π fc / fs)`.
///
/// The analog prototype tuned to this frequency lands its digital corner
/// exactly on `fc` after the bilinear transform.
pub fn warp_cutoff(fc: f64, sample_rate: f64) -> f64 {
    let arg = PI * fc / sample_rate;
    fc * arg.tan() / arg
}

/// User-facing filter parameters.
///
/// Plain value type: copied around, compared field by field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WdfParameters {
    /// Cutoff / center frequency (Hz).
    pub fc: f64,
    pub q: f64,
    /// Boost/cut in dB. Stored for completeness; the passive topologies
    /// here have no gain element that uses it.
    pub boost_cut_db: f64,
    pub frequency_warping: bool,
}

impl Default for WdfParameters {
    fn default() -> Self {
        Self {
            fc: 100.0,
            q: 0.707,
            boost_cut_db: 0.0,
            frequency_warping: true,
        }
    }
}

impl WdfParameters {
    pub fn new(fc: f64, q: f64) -> Self {
        Self {
            fc,
            q,
            ..Self::default()
        }
    }

    /// Analog-prototype frequency for this sample rate, warped when enabled.
    pub fn prototype_fc(&self, sample_rate: f64) -> f64 {
        if self.frequency_warping {
            warp_cutoff(self.fc, sample_rate)
        } else {
            self.fc
        }
    }
}
