//! YAML-based validation configuration.
//!
//! ```yaml
//! global:
//!   sample_rate: 48000
//!   signal_length: 4096
//!
//! cases:
//!   lpf_100hz:
//!     description: "Ideal RLC low-pass at 100 Hz"
//!     kind: ideal_rlc_lpf
//!     parameters:
//!       fc: 100.0
//!       q: 0.707
//!     signals:
//!       - type: impulse
//!       - type: sine
//!         frequency: 100.0
//!     pass_criteria:
//!       normalized_rms_error_db: -120.0
//!       peak_error_db: -100.0
//! ```

use crate::metrics::PassCriteria;
use crate::signals::SignalSpec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use wdfladder::filters::{ButterLadderConfig, FilterKind, IdealRlcConfig};
use wdfladder::WdfParameters;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    #[serde(default)]
    pub global: GlobalConfig,
    pub cases: BTreeMap<String, ValidationCase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,
    /// Samples rendered for impulse and step signals.
    #[serde(default = "default_signal_length")]
    pub signal_length: usize,
}

fn default_sample_rate() -> f64 {
    48_000.0
}

fn default_signal_length() -> usize {
    4096
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            signal_length: default_signal_length(),
        }
    }
}

/// One filter setting checked against its analog reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationCase {
    pub description: String,
    pub kind: FilterKind,
    #[serde(default)]
    pub parameters: WdfParameters,
    #[serde(default)]
    pub ideal_rlc: IdealRlcConfig,
    #[serde(default)]
    pub butter: ButterLadderConfig,
    pub signals: Vec<SignalSpec>,
    #[serde(default)]
    pub pass_criteria: PassCriteria,
}

impl ValidationConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    /// The built-in suite: every filter kind, plus the 100 Hz low-pass.
    pub fn default_config() -> Self {
        Self {
            global: GlobalConfig::default(),
            cases: default_cases(),
        }
    }
}

/// Thresholds for assemblies that are exact bilinear images of their circuit.
fn exact_criteria() -> PassCriteria {
    PassCriteria {
        normalized_rms_error_db: Some(-120.0),
        peak_error_db: Some(-100.0),
    }
}

/// The LC pair adaptors use a reduced port resistance, so band-pass and
/// band-stop only track the analog circuit to around -50 dB.
fn lc_pair_criteria() -> PassCriteria {
    PassCriteria {
        normalized_rms_error_db: Some(-40.0),
        peak_error_db: Some(-30.0),
    }
}

fn standard_signals(frequency: f64) -> Vec<SignalSpec> {
    vec![
        SignalSpec::Impulse { amplitude: 1.0 },
        SignalSpec::Step { amplitude: 1.0 },
        SignalSpec::Sine {
            frequency,
            amplitude: 0.5,
            duration: 0.1,
        },
    ]
}

fn case(description: &str, kind: FilterKind, fc: f64, q: f64) -> ValidationCase {
    let pass_criteria = match kind {
        FilterKind::IdealRlcBpf | FilterKind::IdealRlcBsf => lc_pair_criteria(),
        _ => exact_criteria(),
    };
    ValidationCase {
        description: description.to_string(),
        kind,
        parameters: WdfParameters::new(fc, q),
        ideal_rlc: IdealRlcConfig::default(),
        butter: ButterLadderConfig::default(),
        signals: standard_signals(fc),
        pass_criteria,
    }
}

fn default_cases() -> BTreeMap<String, ValidationCase> {
    let mut cases = BTreeMap::new();
    cases.insert(
        "lpf_100hz".to_string(),
        case("Ideal RLC low-pass, fc=100Hz Q=0.707", FilterKind::IdealRlcLpf, 100.0, 0.707),
    );
    cases.insert(
        "lpf_1khz".to_string(),
        case("Ideal RLC low-pass, fc=1kHz Q=0.707", FilterKind::IdealRlcLpf, 1000.0, 0.707),
    );
    cases.insert(
        "hpf_1khz".to_string(),
        case("Ideal RLC high-pass, fc=1kHz Q=0.707", FilterKind::IdealRlcHpf, 1000.0, 0.707),
    );
    cases.insert(
        "bpf_1khz".to_string(),
        case("Ideal RLC band-pass, fc=1kHz Q=0.707", FilterKind::IdealRlcBpf, 1000.0, 0.707),
    );
    cases.insert(
        "bpf_1khz_q5".to_string(),
        case("Ideal RLC band-pass, fc=1kHz Q=5", FilterKind::IdealRlcBpf, 1000.0, 5.0),
    );
    cases.insert(
        "bsf_1khz".to_string(),
        case("Ideal RLC band-stop, fc=1kHz Q=0.707", FilterKind::IdealRlcBsf, 1000.0, 0.707),
    );
    cases.insert(
        "butter_1khz".to_string(),
        case("Butterworth L-C-L ladder, fc=1kHz", FilterKind::ButterLpf3, 1000.0, 0.707),
    );
    cases.insert(
        "butter_5khz".to_string(),
        case("Butterworth L-C-L ladder, fc=5kHz", FilterKind::ButterLpf3, 5000.0, 0.707),
    );
    cases
}
