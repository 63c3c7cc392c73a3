//! Three-port scattering junctions.
//!
//! Port 1 faces the source, port 2 the load (or the next junction), port 3
//! the attached component. Wave naming on a junction:
//!
//! - `in1` / `out1`: waves entering / leaving at port 1
//! - `in2` / `out2`: waves entering / leaving at port 2
//! - `in3` / `out3`: component's reflected wave (`N2`) / wave sent into
//!   the component (`N1`)
//!
//! Reflection-free junctions scatter in two calls per sample ([`Junction::forward`]
//! then [`Junction::backward`]). Terminated junctions resolve the whole
//! sample in `forward` and only record `in2` in `backward`.

use super::Termination;
use crate::params::{check_float_underflow, SHORT_CIRCUIT_RESISTANCE};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JunctionKind {
    Series,
    Parallel,
    SeriesTerminated,
    ParallelTerminated,
}

impl JunctionKind {
    /// Terminated junctions end a chain: their port 2 is a load.
    pub fn is_terminated(self) -> bool {
        matches!(
            self,
            JunctionKind::SeriesTerminated | JunctionKind::ParallelTerminated
        )
    }

    pub fn is_parallel(self) -> bool {
        matches!(
            self,
            JunctionKind::Parallel | JunctionKind::ParallelTerminated
        )
    }
}

impl fmt::Display for JunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JunctionKind::Series => "series",
            JunctionKind::Parallel => "parallel",
            JunctionKind::SeriesTerminated => "series-terminated",
            JunctionKind::ParallelTerminated => "parallel-terminated",
        })
    }
}

/// Wave values held by one junction between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Waves {
    pub in1: f64,
    pub in2: f64,
    pub in3: f64,
    pub out1: f64,
    pub out2: f64,
    pub out3: f64,
}

/// Outcome of a forward pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Forward {
    /// Continue the forward pass: this wave is `in1` of the next junction.
    Downstream(f64),
    /// Chain end reached: this wave starts the backward pass at port 1.
    Reflect(f64),
}

/// Resistances seen by a junction at initialization time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortResistances {
    pub r1: f64,
    /// Component resistance, 0 when port 3 is empty.
    pub r3: f64,
    /// Component conductance, 0 when port 3 is empty.
    pub g3: f64,
}

// ---------------------------------------------------------------------------
// Junctions
// ---------------------------------------------------------------------------

/// Reflection-free series junction. `B = R1 / (R1 + R3)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeriesJunction {
    pub b: f64,
}

/// Reflection-free parallel junction. `A = G1 / (G1 + G3)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParallelJunction {
    pub a: f64,
}

/// Series junction with a resistive (or open) load on port 2.
///
/// `B1 = 2 R1 / (R1 + R3 + RL)`, `B3 = 2 RL / (R1 + R3 + RL)`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeriesTerminatedJunction {
    pub b1: f64,
    pub b3: f64,
}

/// Parallel junction with a resistive (or open) load on port 2.
///
/// `A1 = 2 G1 / (G1 + G3 + GL)`, `A3 = 2 GL / (G1 + G3 + GL)`, forced to 0
/// for an open load.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParallelTerminatedJunction {
    pub a1: f64,
    pub a3: f64,
}

/// Closed set of junction kinds with their scattering coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Junction {
    Series(SeriesJunction),
    Parallel(ParallelJunction),
    SeriesTerminated(SeriesTerminatedJunction),
    ParallelTerminated(ParallelTerminatedJunction),
}

impl Junction {
    pub fn new(kind: JunctionKind) -> Self {
        match kind {
            JunctionKind::Series => Junction::Series(SeriesJunction::default()),
            JunctionKind::Parallel => Junction::Parallel(ParallelJunction::default()),
            JunctionKind::SeriesTerminated => {
                Junction::SeriesTerminated(SeriesTerminatedJunction::default())
            }
            JunctionKind::ParallelTerminated => {
                Junction::ParallelTerminated(ParallelTerminatedJunction::default())
            }
        }
    }

    pub fn kind(&self) -> JunctionKind {
        match self {
            Junction::Series(_) => JunctionKind::Series,
            Junction::Parallel(_) => JunctionKind::Parallel,
            Junction::SeriesTerminated(_) => JunctionKind::SeriesTerminated,
            Junction::ParallelTerminated(_) => JunctionKind::ParallelTerminated,
        }
    }

    /// Compute scattering coefficients and return the port-2 resistance `R2`.
    pub fn initialize(&mut self, ports: PortResistances, termination: Termination) -> f64 {
        let PortResistances { r1, r3, g3 } = ports;
        match self {
            Junction::Series(j) => {
                j.b = r1 / (r1 + r3);
                r1 + r3
            }
            Junction::Parallel(j) => {
                let g1 = 1.0 / r1;
                j.a = g1 / (g1 + g3);
                1.0 / (g1 + g3)
            }
            Junction::SeriesTerminated(j) => {
                let rl = termination.resistance();
                let total = r1 + r3 + rl;
                j.b1 = 2.0 * r1 / total;
                j.b3 = 2.0 * rl / total;
                r1 + r3
            }
            Junction::ParallelTerminated(j) => {
                let mut rl = termination.resistance();
                if rl <= 0.0 {
                    rl = SHORT_CIRCUIT_RESISTANCE;
                }
                let g1 = 1.0 / r1;
                let gl = 1.0 / rl;
                let total = g1 + g3 + gl;
                j.a1 = 2.0 * g1 / total;
                j.a3 = if termination.is_open() {
                    0.0
                } else {
                    2.0 * gl / total
                };
                1.0 / (g1 + g3)
            }
        }
    }

    /// Forward (incident) pass. `n2` is the component's reflected wave for
    /// this sample. For terminated junctions `w.out3` holds the wave to
    /// feed into the component when this returns.
    #[inline]
    pub fn forward(&self, w: &mut Waves, in1: f64, n2: f64) -> Forward {
        w.in1 = in1;
        w.in3 = n2;
        match self {
            Junction::Series(_) => {
                w.out2 = -(in1 + n2);
                Forward::Downstream(w.out2)
            }
            Junction::Parallel(j) => {
                w.out2 = n2 - j.a * (-in1 + n2);
                Forward::Downstream(w.out2)
            }
            Junction::SeriesTerminated(j) => {
                let n3 = in1 + n2;
                w.out2 = -j.b3 * n3;
                w.out1 = in1 - j.b1 * n3;
                w.out3 = -(w.out1 + w.out2 + n3);
                check_float_underflow(&mut w.out2);
                Forward::Reflect(w.out1)
            }
            Junction::ParallelTerminated(j) => {
                w.out3 = -j.a1 * (-in1 + n2) + n2 - j.a3 * n2;
                w.out1 = -in1 + n2 + w.out3;
                w.out2 = n2 + w.out3;
                check_float_underflow(&mut w.out2);
                Forward::Reflect(w.out1)
            }
        }
    }

    /// Backward (reflected) pass. Returns the wave leaving port 1, or `None`
    /// for terminated junctions, which only record `in2`. On `Some`,
    /// `w.out3` holds the wave to feed into the component.
    #[inline]
    pub fn backward(&self, w: &mut Waves, in2: f64) -> Option<f64> {
        w.in2 = in2;
        let (in1, n2) = (w.in1, w.in3);
        match self {
            Junction::Series(j) => {
                w.out3 = -(in1 - j.b * (in1 + n2 + in2) + in2);
                w.out1 = in1 - j.b * (n2 + in2);
                Some(w.out1)
            }
            Junction::Parallel(j) => {
                w.out3 = in2 - j.a * (-in1 + n2);
                w.out1 = -in1 + n2 + w.out3;
                Some(w.out1)
            }
            Junction::SeriesTerminated(_) | Junction::ParallelTerminated(_) => None,
        }
    }
}
