//! Test execution and orchestration.
//!
//! ```rust
//! use wdfladder_validate::{config::ValidationConfig, runner::ValidationRunner};
//!
//! let runner = ValidationRunner::new(ValidationConfig::default_config());
//! let report = runner.run_case("butter_1khz").unwrap();
//! assert!(report.passed);
//! ```

use crate::analytical::{self, AnalogPrototype};
use crate::config::{ValidationCase, ValidationConfig};
use crate::metrics;
use crate::report::{CaseResult, SignalResult, ValidationReport};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, info, warn};
use wdfladder::{AudioProcessor, WdfError, WdfFilter};

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Unknown case: {0}")]
    UnknownCase(String),
    #[error("Filter setup failed: {0}")]
    Wdf(#[from] WdfError),
}

pub struct ValidationRunner {
    config: ValidationConfig,
}

impl ValidationRunner {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Run every configured case. Setup failures become failed cases.
    pub fn run_all(&self) -> ValidationReport {
        let mut results = BTreeMap::new();
        for (name, case) in &self.config.cases {
            let result = match self.run(name, case) {
                Ok(result) => result,
                Err(e) => {
                    warn!(case = %name, error = %e, "case setup failed");
                    CaseResult::failed(&case.description, case.kind.name(), e.to_string())
                }
            };
            results.insert(name.clone(), result);
        }
        ValidationReport::new(results, self.config.global.sample_rate)
    }

    pub fn run_case(&self, name: &str) -> Result<CaseResult, RunnerError> {
        let case = self
            .config
            .cases
            .get(name)
            .ok_or_else(|| RunnerError::UnknownCase(name.to_string()))?;
        self.run(name, case)
    }

    /// Report containing only `name`.
    pub fn run_single(&self, name: &str) -> Result<ValidationReport, RunnerError> {
        let result = self.run_case(name)?;
        let mut cases = BTreeMap::new();
        cases.insert(name.to_string(), result);
        Ok(ValidationReport::new(cases, self.config.global.sample_rate))
    }

    fn run(&self, name: &str, case: &ValidationCase) -> Result<CaseResult, RunnerError> {
        let fs = self.config.global.sample_rate;
        let mut filter = WdfFilter::build(case.kind, case.ideal_rlc, case.butter)?;
        if !filter.reset(fs) {
            return Err(WdfError::InvalidSampleRate(fs).into());
        }
        filter.set_parameters(case.parameters)?;

        let reference = reference_prototype(&filter).bilinear(fs);
        info!(case = %name, kind = case.kind.name(), fc = case.parameters.fc, "running case");

        let mut signals = Vec::with_capacity(case.signals.len());
        for spec in &case.signals {
            let input = spec.generate(fs, self.config.global.signal_length);
            filter.reset(fs);
            let output: Vec<f64> = input.iter().map(|&x| filter.process_sample(x)).collect();
            let expected = reference.filter(&input);

            let comparison = metrics::compare(&output, &expected);
            let passed = comparison.passes(&case.pass_criteria);
            debug!(
                case = %name,
                signal = %spec.label(),
                rms_db = comparison.normalized_rms_error_db,
                peak_db = comparison.peak_error_db,
                passed,
                "signal compared"
            );
            signals.push(SignalResult {
                label: spec.label(),
                passed,
                level_db: metrics::steady_state_level_db(&output),
                comparison,
            });
        }

        Ok(CaseResult {
            description: case.description.clone(),
            kind: case.kind.name().to_string(),
            passed: signals.iter().all(|s| s.passed),
            error: None,
            signals,
        })
    }
}

/// Analog circuit currently loaded into `filter`.
pub fn reference_prototype(filter: &WdfFilter) -> AnalogPrototype {
    match filter {
        WdfFilter::IdealRlc(f) => analytical::ideal_rlc(f.response(), &f.component_values()),
        WdfFilter::ButterLpf3(f) => {
            let (l1, c1, l2) = f.component_values();
            let config = f.config();
            analytical::butter_ladder(
                l1,
                c1,
                l2,
                config.source_resistance,
                config.load_resistance,
            )
        }
    }
}
