//! Adaptor node: one junction, its port-3 component and its links.

use super::junction::{Forward, Junction, JunctionKind, PortResistances, Waves};
use super::AdaptorId;
use crate::elements::{Component, WdfLeaf};
use crate::params::{DEFAULT_PORT_RESISTANCE, OPEN_CIRCUIT_RESISTANCE};

/// Load on port 2 of a terminated junction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Termination {
    Resistive(f64),
    /// Open circuit, modelled as [`OPEN_CIRCUIT_RESISTANCE`].
    Open,
}

impl Default for Termination {
    fn default() -> Self {
        Termination::Resistive(DEFAULT_PORT_RESISTANCE)
    }
}

impl Termination {
    pub fn resistance(&self) -> f64 {
        match *self {
            Termination::Resistive(r) => r,
            Termination::Open => OPEN_CIRCUIT_RESISTANCE,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Termination::Open)
    }
}

/// A node in the adaptor arena.
#[derive(Debug, Clone)]
pub struct Adaptor {
    pub(super) junction: Junction,
    pub(super) component: Option<Component>,
    pub(super) upstream: Option<AdaptorId>,
    pub(super) downstream: Option<AdaptorId>,
    pub(super) source_resistance: f64,
    pub(super) termination: Termination,
    /// Last termination that was resistive, restored when "open" is cleared.
    pub(super) resistive_load: f64,
    pub(super) r1: f64,
    pub(super) r2: f64,
    pub(super) r3: f64,
    pub(super) waves: Waves,
}

impl Adaptor {
    pub(super) fn new(kind: JunctionKind) -> Self {
        Self {
            junction: Junction::new(kind),
            component: None,
            upstream: None,
            downstream: None,
            source_resistance: DEFAULT_PORT_RESISTANCE,
            termination: Termination::default(),
            resistive_load: DEFAULT_PORT_RESISTANCE,
            r1: 0.0,
            r2: 0.0,
            r3: 0.0,
            waves: Waves::default(),
        }
    }

    pub fn kind(&self) -> JunctionKind {
        self.junction.kind()
    }

    pub fn junction(&self) -> &Junction {
        &self.junction
    }

    pub fn component(&self) -> Option<&Component> {
        self.component.as_ref()
    }

    pub fn waves(&self) -> &Waves {
        &self.waves
    }

    /// Initialize this junction for an incoming port-1 resistance and
    /// return the resistance it presents at port 2.
    pub(super) fn initialize(&mut self, r1: f64) -> f64 {
        let (r3, g3) = match &self.component {
            Some(c) => (c.port_resistance(), c.port_conductance()),
            None => (0.0, 0.0),
        };
        self.r1 = r1;
        self.r3 = r3;
        self.r2 = self
            .junction
            .initialize(PortResistances { r1, r3, g3 }, self.termination);
        self.r2
    }

    #[inline]
    pub(super) fn forward(&mut self, in1: f64) -> Forward {
        let n2 = match &mut self.component {
            Some(c) => c.reflected(),
            None => 0.0,
        };
        let step = self.junction.forward(&mut self.waves, in1, n2);
        if let Forward::Reflect(_) = step {
            self.feed_component();
        }
        step
    }

    #[inline]
    pub(super) fn backward(&mut self, in2: f64) -> Option<f64> {
        let out1 = self.junction.backward(&mut self.waves, in2)?;
        self.feed_component();
        Some(out1)
    }

    #[inline]
    fn feed_component(&mut self) {
        if let Some(c) = &mut self.component {
            c.set_incident(self.waves.out3);
        }
    }

    pub(super) fn reset(&mut self, sample_rate: f64) {
        if let Some(c) = &mut self.component {
            c.reset(sample_rate);
        }
        self.waves = Waves::default();
    }
}
