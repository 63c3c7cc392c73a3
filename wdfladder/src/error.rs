//! Error types for configuration-time operations.
//!
//! The per-sample path never fails; everything here is raised while
//! building, wiring or re-tuning a network.

use crate::tree::AdaptorId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WdfError {
    #[error("invalid {name}: {value} (must be finite and > 0)")]
    InvalidComponentValue { name: &'static str, value: f64 },

    #[error("component kind mismatch: adaptor holds {found}, update is for {expected}")]
    ComponentKindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("no component attached to adaptor {0}")]
    MissingComponent(AdaptorId),

    #[error("unknown adaptor {0}")]
    UnknownAdaptor(AdaptorId),

    #[error("cannot connect adaptor {0} to itself")]
    SelfConnection(AdaptorId),

    #[error("adaptor {0} is terminated and cannot have a downstream adaptor")]
    TerminatedUpstream(AdaptorId),

    #[error("connecting {upstream} -> {downstream} would create a cycle")]
    CycleDetected {
        upstream: AdaptorId,
        downstream: AdaptorId,
    },

    #[error("adaptor chain starting at {0} does not end in a terminated adaptor")]
    UnterminatedChain(AdaptorId),

    #[error("invalid resistance {0} (must be finite and >= 0)")]
    InvalidResistance(f64),

    #[error("invalid sample rate {0}")]
    InvalidSampleRate(f64),

    #[error("invalid parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read preset: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse preset YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("preset rejected: {0}")]
    Wdf(#[from] WdfError),
}
