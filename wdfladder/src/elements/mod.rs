//! WDF one-port components and the closed [`Component`] sum type.
//!
//! - [`WdfLeaf`]: the wave-port contract every component implements
//! - [`linear`]: resistor, capacitor, inductor
//! - [`pairs`]: series/parallel LC, RC and RL two-element one-ports
//! - [`ComponentSpec`]: kind plus electrical value(s), the configuration
//!   surface used by adaptors and presets

mod linear;
mod pairs;

pub use linear::*;
pub use pairs::*;

use crate::error::WdfError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Traits
// ---------------------------------------------------------------------------

/// One-port WDF component attached to port 3 of a junction.
///
/// Components interact with the network only through the incident (`a`)
/// and reflected (`b`) waves at their port.
pub trait WdfLeaf {
    /// Port resistance seen looking into this component (Ω).
    fn port_resistance(&self) -> f64;

    fn port_conductance(&self) -> f64 {
        1.0 / self.port_resistance()
    }

    /// Produce this sample's reflected wave.
    ///
    /// Takes `&mut self` because the resistor/reactance pairs advance a
    /// register here. Junctions call it exactly once per sample, during
    /// the forward pass.
    fn reflected(&mut self) -> f64;

    /// Accept the incident wave from the backward pass.
    fn set_incident(&mut self, a: f64);

    /// Recompute port resistance for a new sample rate. Keeps state.
    fn set_sample_rate(&mut self, _sample_rate: f64) {}

    /// Zero the state registers.
    fn clear(&mut self) {}

    /// State registers, `[0.0, 0.0]` for memoryless components.
    fn registers(&self) -> [f64; 2] {
        [0.0, 0.0]
    }

    /// Clear state and recompute port resistance at `sample_rate`.
    fn reset(&mut self, sample_rate: f64) {
        self.set_sample_rate(sample_rate);
        self.clear();
    }
}

// ---------------------------------------------------------------------------
// Kinds and specs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    Resistor,
    Capacitor,
    Inductor,
    SeriesLc,
    ParallelLc,
    SeriesRc,
    ParallelRc,
    SeriesRl,
    ParallelRl,
}

impl ComponentKind {
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Resistor => "resistor",
            ComponentKind::Capacitor => "capacitor",
            ComponentKind::Inductor => "inductor",
            ComponentKind::SeriesLc => "series LC",
            ComponentKind::ParallelLc => "parallel LC",
            ComponentKind::SeriesRc => "series RC",
            ComponentKind::ParallelRc => "parallel RC",
            ComponentKind::SeriesRl => "series RL",
            ComponentKind::ParallelRl => "parallel RL",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A component kind together with its electrical value(s).
///
/// Units: ohms, henries, farads.
///
/// ```yaml
/// kind: series_rl
/// resistance: 225.1
/// inductance: 0.02533
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentSpec {
    Resistor { resistance: f64 },
    Capacitor { capacitance: f64 },
    Inductor { inductance: f64 },
    SeriesLc { inductance: f64, capacitance: f64 },
    ParallelLc { inductance: f64, capacitance: f64 },
    SeriesRc { resistance: f64, capacitance: f64 },
    ParallelRc { resistance: f64, capacitance: f64 },
    SeriesRl { resistance: f64, inductance: f64 },
    ParallelRl { resistance: f64, inductance: f64 },
}

fn check_value(name: &'static str, value: f64) -> Result<(), WdfError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WdfError::InvalidComponentValue { name, value })
    }
}

impl ComponentSpec {
    pub fn kind(&self) -> ComponentKind {
        match self {
            ComponentSpec::Resistor { .. } => ComponentKind::Resistor,
            ComponentSpec::Capacitor { .. } => ComponentKind::Capacitor,
            ComponentSpec::Inductor { .. } => ComponentKind::Inductor,
            ComponentSpec::SeriesLc { .. } => ComponentKind::SeriesLc,
            ComponentSpec::ParallelLc { .. } => ComponentKind::ParallelLc,
            ComponentSpec::SeriesRc { .. } => ComponentKind::SeriesRc,
            ComponentSpec::ParallelRc { .. } => ComponentKind::ParallelRc,
            ComponentSpec::SeriesRl { .. } => ComponentKind::SeriesRl,
            ComponentSpec::ParallelRl { .. } => ComponentKind::ParallelRl,
        }
    }

    /// Every value must be finite and strictly positive; a zero L or C
    /// would divide by zero in the port-resistance formulas.
    pub fn validate(&self) -> Result<(), WdfError> {
        match *self {
            ComponentSpec::Resistor { resistance } => check_value("resistance", resistance),
            ComponentSpec::Capacitor { capacitance } => check_value("capacitance", capacitance),
            ComponentSpec::Inductor { inductance } => check_value("inductance", inductance),
            ComponentSpec::SeriesLc {
                inductance,
                capacitance,
            }
            | ComponentSpec::ParallelLc {
                inductance,
                capacitance,
            } => {
                check_value("inductance", inductance)?;
                check_value("capacitance", capacitance)
            }
            ComponentSpec::SeriesRc {
                resistance,
                capacitance,
            }
            | ComponentSpec::ParallelRc {
                resistance,
                capacitance,
            } => {
                check_value("resistance", resistance)?;
                check_value("capacitance", capacitance)
            }
            ComponentSpec::SeriesRl {
                resistance,
                inductance,
            }
            | ComponentSpec::ParallelRl {
                resistance,
                inductance,
            } => {
                check_value("resistance", resistance)?;
                check_value("inductance", inductance)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// Closed set of port-3 components, dispatched by `match`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Component {
    Resistor(Resistor),
    Capacitor(Capacitor),
    Inductor(Inductor),
    SeriesLc(SeriesLc),
    ParallelLc(ParallelLc),
    SeriesRc(SeriesRc),
    ParallelRc(ParallelRc),
    SeriesRl(SeriesRl),
    ParallelRl(ParallelRl),
}

macro_rules! dispatch {
    ($self:expr, $c:ident => $body:expr) => {
        match $self {
            Component::Resistor($c) => $body,
            Component::Capacitor($c) => $body,
            Component::Inductor($c) => $body,
            Component::SeriesLc($c) => $body,
            Component::ParallelLc($c) => $body,
            Component::SeriesRc($c) => $body,
            Component::ParallelRc($c) => $body,
            Component::SeriesRl($c) => $body,
            Component::ParallelRl($c) => $body,
        }
    };
}

impl Component {
    /// Build a validated component at `sample_rate`.
    pub fn from_spec(spec: ComponentSpec, sample_rate: f64) -> Result<Self, WdfError> {
        spec.validate()?;
        let fs = sample_rate;
        Ok(match spec {
            ComponentSpec::Resistor { resistance } => Component::Resistor(Resistor::new(resistance)),
            ComponentSpec::Capacitor { capacitance } => {
                Component::Capacitor(Capacitor::new(capacitance, fs))
            }
            ComponentSpec::Inductor { inductance } => {
                Component::Inductor(Inductor::new(inductance, fs))
            }
            ComponentSpec::SeriesLc {
                inductance,
                capacitance,
            } => Component::SeriesLc(SeriesLc::new(inductance, capacitance, fs)),
            ComponentSpec::ParallelLc {
                inductance,
                capacitance,
            } => Component::ParallelLc(ParallelLc::new(inductance, capacitance, fs)),
            ComponentSpec::SeriesRc {
                resistance,
                capacitance,
            } => Component::SeriesRc(SeriesRc::new(resistance, capacitance, fs)),
            ComponentSpec::ParallelRc {
                resistance,
                capacitance,
            } => Component::ParallelRc(ParallelRc::new(resistance, capacitance, fs)),
            ComponentSpec::SeriesRl {
                resistance,
                inductance,
            } => Component::SeriesRl(SeriesRl::new(resistance, inductance, fs)),
            ComponentSpec::ParallelRl {
                resistance,
                inductance,
            } => Component::ParallelRl(ParallelRl::new(resistance, inductance, fs)),
        })
    }

    pub fn kind(&self) -> ComponentKind {
        match self {
            Component::Resistor(_) => ComponentKind::Resistor,
            Component::Capacitor(_) => ComponentKind::Capacitor,
            Component::Inductor(_) => ComponentKind::Inductor,
            Component::SeriesLc(_) => ComponentKind::SeriesLc,
            Component::ParallelLc(_) => ComponentKind::ParallelLc,
            Component::SeriesRc(_) => ComponentKind::SeriesRc,
            Component::ParallelRc(_) => ComponentKind::ParallelRc,
            Component::SeriesRl(_) => ComponentKind::SeriesRl,
            Component::ParallelRl(_) => ComponentKind::ParallelRl,
        }
    }

    /// Current electrical values as a spec.
    pub fn spec(&self) -> ComponentSpec {
        match self {
            Component::Resistor(r) => ComponentSpec::Resistor {
                resistance: r.resistance(),
            },
            Component::Capacitor(c) => ComponentSpec::Capacitor {
                capacitance: c.capacitance(),
            },
            Component::Inductor(l) => ComponentSpec::Inductor {
                inductance: l.inductance(),
            },
            Component::SeriesLc(p) => {
                let (inductance, capacitance) = p.values();
                ComponentSpec::SeriesLc {
                    inductance,
                    capacitance,
                }
            }
            Component::ParallelLc(p) => {
                let (inductance, capacitance) = p.values();
                ComponentSpec::ParallelLc {
                    inductance,
                    capacitance,
                }
            }
            Component::SeriesRc(p) => {
                let (resistance, capacitance) = p.values();
                ComponentSpec::SeriesRc {
                    resistance,
                    capacitance,
                }
            }
            Component::ParallelRc(p) => {
                let (resistance, capacitance) = p.values();
                ComponentSpec::ParallelRc {
                    resistance,
                    capacitance,
                }
            }
            Component::SeriesRl(p) => {
                let (resistance, inductance) = p.values();
                ComponentSpec::SeriesRl {
                    resistance,
                    inductance,
                }
            }
            Component::ParallelRl(p) => {
                let (resistance, inductance) = p.values();
                ComponentSpec::ParallelRl {
                    resistance,
                    inductance,
                }
            }
        }
    }

    /// Change electrical values in place. State registers are kept; the
    /// owning chain must be re-initialized before the next sample.
    pub fn set_values(&mut self, spec: ComponentSpec) -> Result<(), WdfError> {
        if spec.kind() != self.kind() {
            return Err(WdfError::ComponentKindMismatch {
                expected: spec.kind().name(),
                found: self.kind().name(),
            });
        }
        spec.validate()?;
        match (self, spec) {
            (Component::Resistor(r), ComponentSpec::Resistor { resistance }) => {
                r.set_resistance(resistance)
            }
            (Component::Capacitor(c), ComponentSpec::Capacitor { capacitance }) => {
                c.set_capacitance(capacitance)
            }
            (Component::Inductor(l), ComponentSpec::Inductor { inductance }) => {
                l.set_inductance(inductance)
            }
            (
                Component::SeriesLc(p),
                ComponentSpec::SeriesLc {
                    inductance,
                    capacitance,
                },
            ) => p.set_values(inductance, capacitance),
            (
                Component::ParallelLc(p),
                ComponentSpec::ParallelLc {
                    inductance,
                    capacitance,
                },
            ) => p.set_values(inductance, capacitance),
            (
                Component::SeriesRc(p),
                ComponentSpec::SeriesRc {
                    resistance,
                    capacitance,
                },
            ) => p.set_values(resistance, capacitance),
            (
                Component::ParallelRc(p),
                ComponentSpec::ParallelRc {
                    resistance,
                    capacitance,
                },
            ) => p.set_values(resistance, capacitance),
            (
                Component::SeriesRl(p),
                ComponentSpec::SeriesRl {
                    resistance,
                    inductance,
                },
            ) => p.set_values(resistance, inductance),
            (
                Component::ParallelRl(p),
                ComponentSpec::ParallelRl {
                    resistance,
                    inductance,
                },
            ) => p.set_values(resistance, inductance),
            _ => unreachable!("kinds checked above"),
        }
        Ok(())
    }
}

impl WdfLeaf for Component {
    #[inline]
    fn port_resistance(&self) -> f64 {
        dispatch!(self, c => c.port_resistance())
    }

    #[inline]
    fn reflected(&mut self) -> f64 {
        dispatch!(self, c => c.reflected())
    }

    #[inline]
    fn set_incident(&mut self, a: f64) {
        dispatch!(self, c => c.set_incident(a))
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        dispatch!(self, c => c.set_sample_rate(sample_rate))
    }

    fn clear(&mut self) {
        dispatch!(self, c => c.clear())
    }

    fn registers(&self) -> [f64; 2] {
        dispatch!(self, c => c.registers())
    }
}
