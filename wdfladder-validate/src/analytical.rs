//! Exact references for the linear filter assemblies.
//!
//! A WDF built from trapezoidal-rule reactances is the bilinear transform
//! of the analog circuit it models. The references here take the analog
//! transfer function of each circuit, apply the bilinear transform with
//! `s = 2 fs (1 - z^-1) / (1 + z^-1)` and run the resulting IIR filter.
//!
//! Transfer functions match the WDF output taps, including their scaling
//! and polarity:
//!
//! | Circuit | Tap | H(s) |
//! |---------|-----|------|
//! | RLC low-pass | `0.5 out2` | `-1 / (LCs² + RCs + 1)` |
//! | RLC high-pass | `0.5 out2` | `-LCs² / (LCs² + RCs + 1)` |
//! | RLC band-pass | `0.5 out2` | `-RCs / (LCs² + RCs + 1)` |
//! | RLC band-stop | `0.5 out2` | `-(LCs² + 1) / (LCs² + RCs + 1)` |
//! | Butterworth ladder | `out2` | `2 RL / D(s)` |

use num_complex::Complex64;
use std::f64::consts::PI;
use wdfladder::filters::{IdealRlcConfig, RlcResponse};

/// Rational transfer function in `s`, coefficients in ascending powers.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogPrototype {
    pub num: Vec<f64>,
    pub den: Vec<f64>,
}

/// Direct-form IIR filter, `a[0] == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct DigitalFilter {
    pub b: Vec<f64>,
    pub a: Vec<f64>,
}

fn poly_mul(p: &[f64], q: &[f64]) -> Vec<f64> {
    let mut out = vec![0.0; p.len() + q.len() - 1];
    for (i, &x) in p.iter().enumerate() {
        for (j, &y) in q.iter().enumerate() {
            out[i + j] += x * y;
        }
    }
    out
}

fn eval_poly(coeffs: &[f64], x: Complex64) -> Complex64 {
    coeffs
        .iter()
        .rev()
        .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * x + c)
}

impl AnalogPrototype {
    pub fn order(&self) -> usize {
        self.num.len().max(self.den.len()).saturating_sub(1)
    }

    /// `H(j 2π f)`.
    pub fn response(&self, freq: f64) -> Complex64 {
        let s = Complex64::new(0.0, 2.0 * PI * freq);
        eval_poly(&self.num, s) / eval_poly(&self.den, s)
    }

    pub fn magnitude_db(&self, freq: f64) -> f64 {
        20.0 * self.response(freq).norm().max(1e-300).log10()
    }

    /// Bilinear transform at `sample_rate`, no pre-warping.
    pub fn bilinear(&self, sample_rate: f64) -> DigitalFilter {
        let n = self.order();
        let k = 2.0 * sample_rate;
        // s^i (1+z^-1)^n  ->  k^i (1-z^-1)^i (1+z^-1)^(n-i)
        let transform = |coeffs: &[f64]| -> Vec<f64> {
            let mut out = vec![0.0; n + 1];
            for (i, &c) in coeffs.iter().enumerate() {
                if c == 0.0 {
                    continue;
                }
                let mut term = vec![c * k.powi(i as i32)];
                for _ in 0..i {
                    term = poly_mul(&term, &[1.0, -1.0]);
                }
                for _ in i..n {
                    term = poly_mul(&term, &[1.0, 1.0]);
                }
                for (o, t) in out.iter_mut().zip(term) {
                    *o += t;
                }
            }
            out
        };
        let b = transform(&self.num);
        let a = transform(&self.den);
        let a0 = a[0];
        DigitalFilter {
            b: b.iter().map(|x| x / a0).collect(),
            a: a.iter().map(|x| x / a0).collect(),
        }
    }
}

impl DigitalFilter {
    pub fn filter(&self, input: &[f64]) -> Vec<f64> {
        let mut y: Vec<f64> = Vec::with_capacity(input.len());
        for n in 0..input.len() {
            let mut acc = 0.0;
            for (k, &bk) in self.b.iter().enumerate() {
                if k <= n {
                    acc += bk * input[n - k];
                }
            }
            for (k, &ak) in self.a.iter().enumerate().skip(1) {
                if k <= n {
                    acc -= ak * y[n - k];
                }
            }
            y.push(acc);
        }
        y
    }

    pub fn impulse_response(&self, n: usize) -> Vec<f64> {
        let mut x = vec![0.0; n];
        if let Some(first) = x.first_mut() {
            *first = 1.0;
        }
        self.filter(&x)
    }

    /// `|H(e^{jω})|` in dB at `freq`.
    pub fn magnitude_db(&self, freq: f64, sample_rate: f64) -> f64 {
        let z_inv = Complex64::from_polar(1.0, -2.0 * PI * freq / sample_rate);
        let h = eval_poly(&self.b, z_inv) / eval_poly(&self.a, z_inv);
        20.0 * h.norm().max(1e-300).log10()
    }
}

/// Analog transfer function of an ideal RLC filter tap.
pub fn ideal_rlc(response: RlcResponse, values: &IdealRlcConfig) -> AnalogPrototype {
    let IdealRlcConfig {
        inductance: l,
        capacitance: c,
        resistance: r,
    } = *values;
    let den = vec![1.0, r * c, l * c];
    let num = match response {
        RlcResponse::Lowpass => vec![-1.0],
        RlcResponse::Highpass => vec![0.0, 0.0, -l * c],
        RlcResponse::Bandpass => vec![0.0, -r * c],
        RlcResponse::Bandstop => vec![-1.0, 0.0, -l * c],
    };
    AnalogPrototype { num, den }
}

/// Analog transfer function of the doubly terminated L-C-L ladder,
/// measured as the port-2 wave (twice the load voltage).
///
/// `D(s) = L1 C L2 s³ + (Rs C L2 + L1 C RL) s² + (Rs C RL + L1 + L2) s + Rs + RL`
pub fn butter_ladder(l1: f64, c1: f64, l2: f64, rs: f64, rl: f64) -> AnalogPrototype {
    AnalogPrototype {
        num: vec![2.0 * rl],
        den: vec![
            rs + rl,
            rs * c1 * rl + l1 + l2,
            rs * c1 * l2 + l1 * c1 * rl,
            l1 * c1 * l2,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_order_bilinear_matches_textbook() {
        // H(s) = 1 / (1 + RCs), RC = 1e-3 at 48 kHz
        let proto = AnalogPrototype {
            num: vec![1.0],
            den: vec![1.0, 1e-3],
        };
        let d = proto.bilinear(48_000.0);
        let k = 2.0 * 48_000.0 * 1e-3;
        assert!((d.b[0] - 1.0 / (1.0 + k)).abs() < 1e-12);
        assert!((d.b[1] - 1.0 / (1.0 + k)).abs() < 1e-12);
        assert!((d.a[1] - (1.0 - k) / (1.0 + k)).abs() < 1e-12);
    }

    #[test]
    fn lowpass_reference_dc_and_corner() {
        let values = IdealRlcConfig::default();
        let proto = ideal_rlc(RlcResponse::Lowpass, &values);
        assert!((proto.response(0.0).re + 1.0).abs() < 1e-12);
        let f0 = values.resonant_frequency();
        let q = values.quality();
        // |H(f0)| = Q for the series RLC low-pass.
        assert!((proto.magnitude_db(f0) - 20.0 * q.log10()).abs() < 1e-6);
    }

    #[test]
    fn digital_magnitude_is_warped_analog() {
        let fs = 48_000.0;
        let proto = ideal_rlc(RlcResponse::Bandpass, &IdealRlcConfig::default());
        let d = proto.bilinear(fs);
        let f = 3000.0;
        let analog_f = fs / PI * (PI * f / fs).tan();
        assert!((d.magnitude_db(f, fs) - proto.magnitude_db(analog_f)).abs() < 1e-9);
    }

    #[test]
    fn butter_ladder_dc_is_unity() {
        let p = butter_ladder(95.49e-3, 0.5305e-6, 95.49e-3, 600.0, 600.0);
        assert!((p.response(0.0).re - 1.0).abs() < 1e-12);
        // 1 kHz corner for these values
        assert!((p.magnitude_db(1000.0) + 3.01).abs() < 0.05);
        assert_eq!(p.order(), 3);
    }

    #[test]
    fn filter_runs_difference_equation() {
        let d = DigitalFilter {
            b: vec![0.5],
            a: vec![1.0, -0.5],
        };
        let y = d.impulse_response(4);
        assert_eq!(y, vec![0.5, 0.25, 0.125, 0.0625]);
    }
}
