//! YAML filter presets.
//!
//! ```yaml
//! kind: ideal_rlc_lpf
//! sample_rate: 48000
//! gain: 1.0
//! parameters:
//!   fc: 1000.0
//!   q: 0.707
//!   boost_cut_db: 0.0
//!   frequency_warping: true
//! ideal_rlc:
//!   inductance: 0.02533
//!   capacitance: 1.0e-6
//!   resistance: 225.1131
//! butter:
//!   l1: 95.49
//!   c1: 0.0005305
//!   l2: 95.49
//! ```
//!
//! Every section except `kind` is optional.

use crate::error::ConfigError;
use crate::filters::{ButterLadderConfig, FilterKind, GainedFilter, IdealRlcConfig, WdfFilter};
use crate::params::{WdfParameters, DEFAULT_SAMPLE_RATE};
use crate::AudioProcessor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterPreset {
    pub kind: FilterKind,
    #[serde(default = "default_sample_rate")]
    pub sample_rate: f64,
    /// Linear output gain.
    #[serde(default = "default_gain")]
    pub gain: f64,
    #[serde(default)]
    pub parameters: WdfParameters,
    #[serde(default)]
    pub ideal_rlc: IdealRlcConfig,
    #[serde(default)]
    pub butter: ButterLadderConfig,
}

fn default_sample_rate() -> f64 {
    DEFAULT_SAMPLE_RATE
}

fn default_gain() -> f64 {
    1.0
}

impl FilterPreset {
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            sample_rate: default_sample_rate(),
            gain: default_gain(),
            parameters: WdfParameters::default(),
            ideal_rlc: IdealRlcConfig::default(),
            butter: ButterLadderConfig::default(),
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let preset = Self::from_yaml_str(&content)?;
        info!(path = %path.as_ref().display(), kind = preset.kind.name(), "loaded preset");
        Ok(preset)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_yaml_string()?)?;
        Ok(())
    }

    /// Build the filter, reset it at `sample_rate` and apply `parameters`.
    pub fn build(&self) -> Result<GainedFilter, ConfigError> {
        self.build_at(self.sample_rate)
    }

    /// As [`build`](Self::build), overriding the preset's sample rate.
    pub fn build_at(&self, sample_rate: f64) -> Result<GainedFilter, ConfigError> {
        let mut filter = WdfFilter::build(self.kind, self.ideal_rlc, self.butter)?;
        if !filter.reset(sample_rate) {
            return Err(crate::WdfError::InvalidSampleRate(sample_rate).into());
        }
        filter.set_parameters(self.parameters)?;
        Ok(GainedFilter {
            filter,
            gain: self.gain,
        })
    }
}
