//! Deterministic test signal generators.
//!
//! | Signal | Use Case |
//! |--------|----------|
//! | [`impulse`] | Impulse response against the bilinear reference |
//! | [`step`] | DC settling, polarity |
//! | [`sine`] | Steady-state gain at one frequency |
//! | [`silence`] | Denormal and drift checks |

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Unit sample at t=0.
pub fn impulse(n_samples: usize, amplitude: f64) -> Vec<f64> {
    let mut signal = vec![0.0; n_samples];
    if let Some(first) = signal.first_mut() {
        *first = amplitude;
    }
    signal
}

pub fn step(n_samples: usize, amplitude: f64) -> Vec<f64> {
    vec![amplitude; n_samples]
}

pub fn sine(sample_rate: f64, frequency: f64, duration: f64, amplitude: f64) -> Vec<f64> {
    let n_samples = (duration * sample_rate) as usize;
    (0..n_samples)
        .map(|i| amplitude * (2.0 * PI * frequency * i as f64 / sample_rate).sin())
        .collect()
}

pub fn silence(n_samples: usize) -> Vec<f64> {
    vec![0.0; n_samples]
}

fn default_amplitude() -> f64 {
    1.0
}

fn default_duration() -> f64 {
    0.1
}

/// A test signal as written in a validation config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SignalSpec {
    Impulse {
        #[serde(default = "default_amplitude")]
        amplitude: f64,
    },
    Step {
        #[serde(default = "default_amplitude")]
        amplitude: f64,
    },
    Sine {
        frequency: f64,
        #[serde(default = "default_amplitude")]
        amplitude: f64,
        #[serde(default = "default_duration")]
        duration: f64,
    },
}

impl SignalSpec {
    /// Render the signal. Impulse and step use `length` samples.
    pub fn generate(&self, sample_rate: f64, length: usize) -> Vec<f64> {
        match *self {
            SignalSpec::Impulse { amplitude } => impulse(length, amplitude),
            SignalSpec::Step { amplitude } => step(length, amplitude),
            SignalSpec::Sine {
                frequency,
                amplitude,
                duration,
            } => sine(sample_rate, frequency, duration, amplitude),
        }
    }

    pub fn label(&self) -> String {
        match self {
            SignalSpec::Impulse { .. } => "impulse".to_string(),
            SignalSpec::Step { .. } => "step".to_string(),
            SignalSpec::Sine { frequency, .. } => format!("sine_{frequency}hz"),
        }
    }
}
