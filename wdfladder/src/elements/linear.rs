//! Single-element one-ports: Resistor, Capacitor, Inductor.

use super::WdfLeaf;
use crate::params::check_float_underflow;

// ---------------------------------------------------------------------------
// Resistor
// ---------------------------------------------------------------------------

/// Ideal resistor. Absorbs everything, reflects nothing.
///
/// `b = 0`, `Rp = R` (independent of sample rate)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistor {
    resistance: f64,
}

impl Resistor {
    pub fn new(resistance: f64) -> Self {
        Self { resistance }
    }

    pub fn resistance(&self) -> f64 {
        self.resistance
    }

    pub fn set_resistance(&mut self, resistance: f64) {
        self.resistance = resistance;
    }
}

impl WdfLeaf for Resistor {
    #[inline]
    fn port_resistance(&self) -> f64 {
        self.resistance
    }

    #[inline]
    fn reflected(&mut self) -> f64 {
        0.0
    }

    #[inline]
    fn set_incident(&mut self, _a: f64) {}
}

// ---------------------------------------------------------------------------
// Capacitor
// ---------------------------------------------------------------------------

/// Capacitor.
///
/// `b[n] = z^{-1} a[n]`
/// `Rp = 1 / (2 * fs * C)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacitor {
    capacitance: f64,
    sample_rate: f64,
    resistance: f64,
    state: f64,
}

impl Capacitor {
    pub fn new(capacitance: f64, sample_rate: f64) -> Self {
        Self {
            capacitance,
            sample_rate,
            resistance: 1.0 / (2.0 * sample_rate * capacitance),
            state: 0.0,
        }
    }

    pub fn capacitance(&self) -> f64 {
        self.capacitance
    }

    pub fn set_capacitance(&mut self, capacitance: f64) {
        self.capacitance = capacitance;
        self.set_sample_rate(self.sample_rate);
    }
}

impl WdfLeaf for Capacitor {
    #[inline]
    fn port_resistance(&self) -> f64 {
        self.resistance
    }

    #[inline]
    fn reflected(&mut self) -> f64 {
        self.state
    }

    #[inline]
    fn set_incident(&mut self, a: f64) {
        self.state = a;
        check_float_underflow(&mut self.state);
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.resistance = 1.0 / (2.0 * sample_rate * self.capacitance);
    }

    fn clear(&mut self) {
        self.state = 0.0;
    }

    fn registers(&self) -> [f64; 2] {
        [self.state, 0.0]
    }
}

// ---------------------------------------------------------------------------
// Inductor
// ---------------------------------------------------------------------------

/// Inductor. Dual of the capacitor: same delay, inverted reflection.
///
/// `b[n] = -z^{-1} a[n]`
/// `Rp = 2 * fs * L`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inductor {
    inductance: f64,
    sample_rate: f64,
    resistance: f64,
    state: f64,
}

impl Inductor {
    pub fn new(inductance: f64, sample_rate: f64) -> Self {
        Self {
            inductance,
            sample_rate,
            resistance: 2.0 * sample_rate * inductance,
            state: 0.0,
        }
    }

    pub fn inductance(&self) -> f64 {
        self.inductance
    }

    pub fn set_inductance(&mut self, inductance: f64) {
        self.inductance = inductance;
        self.set_sample_rate(self.sample_rate);
    }
}

impl WdfLeaf for Inductor {
    #[inline]
    fn port_resistance(&self) -> f64 {
        self.resistance
    }

    #[inline]
    fn reflected(&mut self) -> f64 {
        -self.state
    }

    #[inline]
    fn set_incident(&mut self, a: f64) {
        self.state = a;
        check_float_underflow(&mut self.state);
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.resistance = 2.0 * sample_rate * self.inductance;
    }

    fn clear(&mut self) {
        self.state = 0.0;
    }

    fn registers(&self) -> [f64; 2] {
        [self.state, 0.0]
    }
}
