//! WDF adaptor network.
//!
//! A [`WdfTree`] owns every adaptor of one filter in an arena and hands out
//! [`AdaptorId`] handles. Links between adaptors are ids, components live
//! inside the adaptor that carries them on port 3.
//!
//! Lifecycle:
//! 1. `add_adaptor` + `set_component` for each junction
//! 2. `connect_adaptors(up, down)` to wire port 2 of `up` to port 1 of `down`
//! 3. `initialize_adaptor_chain(head)`: top-down resistance pass
//! 4. per sample: `set_input1(head, x)`, then read `output2(tail)`
//!
//! Any component-value, resistance or sample-rate change must be followed
//! by step 3 before the next sample.

mod adaptor;
mod junction;

pub use adaptor::{Adaptor, Termination};
pub use junction::{
    Forward, Junction, JunctionKind, ParallelJunction, ParallelTerminatedJunction,
    PortResistances, SeriesJunction, SeriesTerminatedJunction, Waves,
};

use crate::elements::{Component, ComponentSpec, WdfLeaf};
use crate::error::WdfError;
use crate::params::DEFAULT_SAMPLE_RATE;
use std::fmt;
use tracing::{debug, trace};

/// Stable handle to an adaptor inside one [`WdfTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AdaptorId(usize);

impl AdaptorId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for AdaptorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

fn check_resistance(r: f64) -> Result<f64, WdfError> {
    if r.is_finite() && r >= 0.0 {
        Ok(r)
    } else {
        Err(WdfError::InvalidResistance(r))
    }
}

/// Arena of adaptors forming one or more chains.
#[derive(Debug, Clone)]
pub struct WdfTree {
    nodes: Vec<Adaptor>,
    sample_rate: f64,
    initialized: bool,
}

impl Default for WdfTree {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl WdfTree {
    pub fn new(sample_rate: f64) -> Self {
        Self {
            nodes: Vec::new(),
            sample_rate,
            initialized: false,
        }
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// `false` after any change that invalidates scattering coefficients,
    /// until the next successful [`initialize_adaptor_chain`](Self::initialize_adaptor_chain).
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn node(&self, id: AdaptorId) -> Result<&Adaptor, WdfError> {
        self.nodes.get(id.0).ok_or(WdfError::UnknownAdaptor(id))
    }

    fn node_mut(&mut self, id: AdaptorId) -> Result<&mut Adaptor, WdfError> {
        self.nodes.get_mut(id.0).ok_or(WdfError::UnknownAdaptor(id))
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    pub fn add_adaptor(&mut self, kind: JunctionKind) -> AdaptorId {
        let id = AdaptorId(self.nodes.len());
        self.nodes.push(Adaptor::new(kind));
        self.initialized = false;
        id
    }

    /// Attach (or replace) the port-3 component, built at the tree's
    /// sample rate with cleared state.
    pub fn set_component(&mut self, id: AdaptorId, spec: ComponentSpec) -> Result<(), WdfError> {
        let component = Component::from_spec(spec, self.sample_rate)?;
        self.node_mut(id)?.component = Some(component);
        self.initialized = false;
        Ok(())
    }

    /// Change the values of the attached component without touching its state.
    pub fn set_component_values(
        &mut self,
        id: AdaptorId,
        spec: ComponentSpec,
    ) -> Result<(), WdfError> {
        let component = self
            .node_mut(id)?
            .component
            .as_mut()
            .ok_or(WdfError::MissingComponent(id))?;
        component.set_values(spec)?;
        self.initialized = false;
        Ok(())
    }

    /// Wire port 2 of `upstream` to port 1 of `downstream`.
    ///
    /// Existing links on those two ports are dropped. Terminated adaptors
    /// cannot have a downstream neighbour and links may not close a loop.
    pub fn connect_adaptors(
        &mut self,
        upstream: AdaptorId,
        downstream: AdaptorId,
    ) -> Result<(), WdfError> {
        if upstream == downstream {
            return Err(WdfError::SelfConnection(upstream));
        }
        if self.node(upstream)?.kind().is_terminated() {
            return Err(WdfError::TerminatedUpstream(upstream));
        }
        self.node(downstream)?;

        // Walking down from `downstream` must never reach `upstream`.
        let mut cursor = Some(downstream);
        while let Some(id) = cursor {
            if id == upstream {
                return Err(WdfError::CycleDetected {
                    upstream,
                    downstream,
                });
            }
            cursor = self.nodes[id.0].downstream;
        }

        if let Some(old) = self.nodes[upstream.0].downstream.take() {
            self.nodes[old.0].upstream = None;
        }
        if let Some(old) = self.nodes[downstream.0].upstream.take() {
            self.nodes[old.0].downstream = None;
        }
        self.nodes[upstream.0].downstream = Some(downstream);
        self.nodes[downstream.0].upstream = Some(upstream);
        self.initialized = false;
        Ok(())
    }

    /// Resistance seeding the chain when this adaptor is its head.
    pub fn set_source_resistance(&mut self, id: AdaptorId, r: f64) -> Result<(), WdfError> {
        let r = check_resistance(r)?;
        self.node_mut(id)?.source_resistance = r;
        self.initialized = false;
        Ok(())
    }

    /// Resistive load on port 2. Clears an open-circuit termination.
    pub fn set_terminal_resistance(&mut self, id: AdaptorId, r: f64) -> Result<(), WdfError> {
        let r = check_resistance(r)?;
        let node = self.node_mut(id)?;
        node.resistive_load = r;
        node.termination = Termination::Resistive(r);
        self.initialized = false;
        Ok(())
    }

    /// Switch port 2 between an open circuit and the last resistive load.
    pub fn set_open_terminal_resistance(
        &mut self,
        id: AdaptorId,
        open: bool,
    ) -> Result<(), WdfError> {
        let node = self.node_mut(id)?;
        node.termination = if open {
            Termination::Open
        } else {
            Termination::Resistive(node.resistive_load)
        };
        self.initialized = false;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Initialization
    // -----------------------------------------------------------------------

    /// Top-down resistance pass starting at `head`, seeded by its source
    /// resistance. Each adaptor computes its coefficients from `R1` and its
    /// component, then hands `R2` to the next. The chain must end at a
    /// terminated adaptor.
    pub fn initialize_adaptor_chain(&mut self, head: AdaptorId) -> Result<(), WdfError> {
        let mut r1 = self.node(head)?.source_resistance;
        let mut cursor = head;
        loop {
            let node = &mut self.nodes[cursor.0];
            if node.kind().is_parallel() && r1 <= 0.0 {
                return Err(WdfError::InvalidResistance(r1));
            }
            if node.kind() == JunctionKind::Series {
                let r3 = node.component().map_or(0.0, |c| c.port_resistance());
                if r1 + r3 <= 0.0 {
                    return Err(WdfError::InvalidResistance(r1 + r3));
                }
            }
            let r2 = node.initialize(r1);
            trace!(
                adaptor = %cursor,
                kind = %node.kind(),
                r1,
                r3 = node.r3,
                r2,
                "adaptor initialized"
            );
            if node.kind().is_terminated() {
                break;
            }
            cursor = node
                .downstream
                .ok_or(WdfError::UnterminatedChain(head))?;
            r1 = r2;
        }
        self.initialized = true;
        debug!(head = %head, tail = %cursor, "adaptor chain initialized");
        Ok(())
    }

    /// Clear every component register and node wave, recomputing port
    /// resistances at `sample_rate`. The chain must be re-initialized
    /// afterwards. Returns `false` (and changes nothing) for a rate that
    /// is not finite and positive.
    pub fn reset(&mut self, sample_rate: f64) -> bool {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return false;
        }
        self.sample_rate = sample_rate;
        for node in &mut self.nodes {
            node.reset(sample_rate);
        }
        self.initialized = false;
        true
    }

    // -----------------------------------------------------------------------
    // Processing
    // -----------------------------------------------------------------------

    /// Push an incident wave into port 1 of `id` and run the sample.
    ///
    /// The forward pass walks down to the terminated adaptor, which starts
    /// the backward pass back up to the head. Unknown ids are ignored.
    #[inline]
    pub fn set_input1(&mut self, id: AdaptorId, wave: f64) {
        let mut cursor = id;
        let mut incident = wave;
        loop {
            let Some(node) = self.nodes.get_mut(cursor.0) else {
                return;
            };
            match node.forward(incident) {
                Forward::Downstream(out2) => match node.downstream {
                    Some(next) => {
                        cursor = next;
                        incident = out2;
                    }
                    None => return,
                },
                Forward::Reflect(out1) => {
                    self.propagate_up(cursor, out1);
                    return;
                }
            }
        }
    }

    /// Push a reflected wave into port 2 of `id`. Reflection-free adaptors
    /// scatter and continue the backward pass upstream; terminated adaptors
    /// only record it.
    #[inline]
    pub fn set_input2(&mut self, id: AdaptorId, wave: f64) {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return;
        };
        if let Some(out1) = node.backward(wave) {
            self.propagate_up(id, out1);
        }
    }

    #[inline]
    fn propagate_up(&mut self, from: AdaptorId, mut wave: f64) {
        let mut cursor = self.nodes[from.0].upstream;
        while let Some(id) = cursor {
            let node = &mut self.nodes[id.0];
            match node.backward(wave) {
                Some(out1) => wave = out1,
                None => return,
            }
            cursor = node.upstream;
        }
    }

    /// Wave leaving port 1 (toward the source) on the last sample.
    #[inline]
    pub fn output1(&self, id: AdaptorId) -> f64 {
        self.nodes.get(id.0).map_or(0.0, |n| n.waves.out1)
    }

    /// Wave leaving port 2. On a terminated adaptor this is the filter tap.
    #[inline]
    pub fn output2(&self, id: AdaptorId) -> f64 {
        self.nodes.get(id.0).map_or(0.0, |n| n.waves.out2)
    }

    // -----------------------------------------------------------------------
    // Inspection
    // -----------------------------------------------------------------------

    pub fn adaptor(&self, id: AdaptorId) -> Result<&Adaptor, WdfError> {
        self.node(id)
    }

    pub fn junction_kind(&self, id: AdaptorId) -> Result<JunctionKind, WdfError> {
        Ok(self.node(id)?.kind())
    }

    pub fn component(&self, id: AdaptorId) -> Result<Option<&Component>, WdfError> {
        Ok(self.node(id)?.component())
    }

    pub fn upstream(&self, id: AdaptorId) -> Result<Option<AdaptorId>, WdfError> {
        Ok(self.node(id)?.upstream)
    }

    pub fn downstream(&self, id: AdaptorId) -> Result<Option<AdaptorId>, WdfError> {
        Ok(self.node(id)?.downstream)
    }

    pub fn termination(&self, id: AdaptorId) -> Result<Termination, WdfError> {
        Ok(self.node(id)?.termination)
    }

    /// Port-1 resistance from the last initialization.
    pub fn r1(&self, id: AdaptorId) -> Result<f64, WdfError> {
        Ok(self.node(id)?.r1)
    }

    /// Port-2 (downstream) resistance from the last initialization.
    pub fn r2(&self, id: AdaptorId) -> Result<f64, WdfError> {
        Ok(self.node(id)?.r2)
    }

    /// Component resistance from the last initialization.
    pub fn r3(&self, id: AdaptorId) -> Result<f64, WdfError> {
        Ok(self.node(id)?.r3)
    }

    /// Largest register magnitude across every component.
    pub fn max_register_magnitude(&self) -> f64 {
        self.nodes
            .iter()
            .filter_map(|n| n.component.as_ref())
            .flat_map(|c| c.registers())
            .fold(0.0, |m, z| m.max(z.abs()))
    }

    /// Every component register, in adaptor order.
    pub fn registers(&self) -> impl Iterator<Item = f64> + '_ {
        self.nodes
            .iter()
            .filter_map(|n| n.component.as_ref())
            .flat_map(|c| c.registers())
    }
}
