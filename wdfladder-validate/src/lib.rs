//! # wdfladder validation library
//!
//! Checks the WDF filter assemblies in `wdfladder` against the bilinear
//! transform of the analog circuits they model. The trapezoidal-rule
//! reactances make the two identical up to rounding wherever the adaptor
//! formulas are exact.
//!
//! ```rust
//! use wdfladder::filters::RlcResponse;
//! use wdfladder::filters::IdealRlcConfig;
//! use wdfladder_validate::{analytical, metrics, signals};
//!
//! let proto = analytical::ideal_rlc(RlcResponse::Lowpass, &IdealRlcConfig::default());
//! let reference = proto.bilinear(48_000.0);
//! let ir = reference.impulse_response(256);
//! let result = metrics::compare(&ir, &ir);
//! assert_eq!(result.normalized_rms_error_db, metrics::EXACT_MATCH_DB);
//! # let _ = signals::impulse(4, 1.0);
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Run the built-in suite
//! wdfladder-validate run
//!
//! # Run one case from a YAML suite and keep a JSON report
//! wdfladder-validate run --config validate.yaml --case bpf_1khz --report report.json
//!
//! # List cases
//! wdfladder-validate list
//! ```
//!
//! ## Module Overview
//!
//! - [`signals`] - Deterministic test signal generators
//! - [`metrics`] - Error metrics between WDF and reference output
//! - [`analytical`] - Analog transfer functions and their bilinear transform
//! - [`config`] - YAML-based case configuration
//! - [`runner`] - Case orchestration
//! - [`report`] - JSON and terminal reporting

pub mod analytical;
pub mod config;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod signals;

pub use config::{ConfigError, GlobalConfig, ValidationCase, ValidationConfig};
pub use metrics::{ComparisonResult, PassCriteria};
pub use report::{CaseResult, ReportSummary, SignalResult, ValidationReport};
pub use runner::{RunnerError, ValidationRunner};
pub use signals::SignalSpec;

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::analytical::{butter_ladder, ideal_rlc, AnalogPrototype, DigitalFilter};
    pub use crate::config::{GlobalConfig, ValidationCase, ValidationConfig};
    pub use crate::metrics::{
        compare, normalized_rms_error_db, peak_error_db, ComparisonResult, PassCriteria,
    };
    pub use crate::report::{CaseResult, SignalResult, ValidationReport};
    pub use crate::runner::{reference_prototype, ValidationRunner};
    pub use crate::signals::{impulse, silence, sine, step, SignalSpec};
}
