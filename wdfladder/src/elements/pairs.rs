//! Two-element one-ports: series/parallel LC, RC and RL pairs.
//!
//! Each pair carries two state registers. The LC pairs update both on
//! `set_incident`; the RC and RL pairs latch the incident wave there and
//! advance their second register when the reflected wave is produced, so
//! `reflected` must be called exactly once per sample (which is what every
//! junction does).

use super::WdfLeaf;
use crate::params::check_float_underflow;

/// `Rp` of an inductor: `2 * fs * L`.
#[inline]
fn inductor_resistance(inductance: f64, sample_rate: f64) -> f64 {
    2.0 * inductance * sample_rate
}

/// `Rp` of a capacitor: `1 / (2 * fs * C)`.
#[inline]
fn capacitor_resistance(capacitance: f64, sample_rate: f64) -> f64 {
    1.0 / (2.0 * capacitance * sample_rate)
}

// ---------------------------------------------------------------------------
// Series LC
// ---------------------------------------------------------------------------

/// Series LC pair.
///
/// `Rp = R_L + 1/R_C`
/// `K = (1 - R_L/R_C) / (1 + R_L/R_C)`
/// `N1 = K (a - zL);  zL <- N1 + zC;  zC <- a;  b = zL`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesLc {
    inductance: f64,
    capacitance: f64,
    sample_rate: f64,
    rl: f64,
    rc: f64,
    resistance: f64,
    k: f64,
    zl: f64,
    zc: f64,
}

impl SeriesLc {
    pub fn new(inductance: f64, capacitance: f64, sample_rate: f64) -> Self {
        let mut pair = Self {
            inductance,
            capacitance,
            sample_rate,
            rl: 0.0,
            rc: 0.0,
            resistance: 0.0,
            k: 0.0,
            zl: 0.0,
            zc: 0.0,
        };
        pair.update_resistances();
        pair
    }

    pub fn values(&self) -> (f64, f64) {
        (self.inductance, self.capacitance)
    }

    pub fn set_values(&mut self, inductance: f64, capacitance: f64) {
        self.inductance = inductance;
        self.capacitance = capacitance;
        self.update_resistances();
    }

    fn update_resistances(&mut self) {
        self.rl = inductor_resistance(self.inductance, self.sample_rate);
        self.rc = capacitor_resistance(self.capacitance, self.sample_rate);
        self.resistance = self.rl + 1.0 / self.rc;
        let ratio = self.rl / self.rc;
        self.k = (1.0 - ratio) / (1.0 + ratio);
    }
}

impl WdfLeaf for SeriesLc {
    #[inline]
    fn port_resistance(&self) -> f64 {
        self.resistance
    }

    #[inline]
    fn reflected(&mut self) -> f64 {
        self.zl
    }

    #[inline]
    fn set_incident(&mut self, a: f64) {
        let n1 = self.k * (a - self.zl);
        self.zl = n1 + self.zc;
        self.zc = a;
        check_float_underflow(&mut self.zl);
        check_float_underflow(&mut self.zc);
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.update_resistances();
    }

    fn clear(&mut self) {
        self.zl = 0.0;
        self.zc = 0.0;
    }

    fn registers(&self) -> [f64; 2] {
        [self.zl, self.zc]
    }
}

// ---------------------------------------------------------------------------
// Parallel LC
// ---------------------------------------------------------------------------

/// Parallel LC pair.
///
/// `Rp = R_C + 1/R_L`
/// `K = (R_C/R_L - 1) / (R_C/R_L + 1)`
/// `N1 = K (a - zL);  zL <- N1 + zC;  zC <- a;  b = -zL`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallelLc {
    inductance: f64,
    capacitance: f64,
    sample_rate: f64,
    rl: f64,
    rc: f64,
    resistance: f64,
    k: f64,
    zl: f64,
    zc: f64,
}

impl ParallelLc {
    pub fn new(inductance: f64, capacitance: f64, sample_rate: f64) -> Self {
        let mut pair = Self {
            inductance,
            capacitance,
            sample_rate,
            rl: 0.0,
            rc: 0.0,
            resistance: 0.0,
            k: 0.0,
            zl: 0.0,
            zc: 0.0,
        };
        pair.update_resistances();
        pair
    }

    pub fn values(&self) -> (f64, f64) {
        (self.inductance, self.capacitance)
    }

    pub fn set_values(&mut self, inductance: f64, capacitance: f64) {
        self.inductance = inductance;
        self.capacitance = capacitance;
        self.update_resistances();
    }

    fn update_resistances(&mut self) {
        self.rl = inductor_resistance(self.inductance, self.sample_rate);
        self.rc = capacitor_resistance(self.capacitance, self.sample_rate);
        self.resistance = self.rc + 1.0 / self.rl;
        let ratio = self.rc / self.rl;
        self.k = (ratio - 1.0) / (ratio + 1.0);
    }
}

impl WdfLeaf for ParallelLc {
    #[inline]
    fn port_resistance(&self) -> f64 {
        self.resistance
    }

    #[inline]
    fn reflected(&mut self) -> f64 {
        -self.zl
    }

    #[inline]
    fn set_incident(&mut self, a: f64) {
        let n1 = self.k * (a - self.zl);
        self.zl = n1 + self.zc;
        self.zc = a;
        check_float_underflow(&mut self.zl);
        check_float_underflow(&mut self.zc);
    }

    fn set_sample_rate(&mut self, sample_rate: f64) {
        self.sample_rate = sample_rate;
        self.update_resistances();
    }

    fn clear(&mut self) {
        self.zl = 0.0;
        self.zc = 0.0;
    }

    fn registers(&self) -> [f64; 2] {
        [self.zl, self.zc]
    }
}

// ---------------------------------------------------------------------------
// Resistor + reactance pairs
// ---------------------------------------------------------------------------

/// Which reactive element sits next to the resistor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reactance {
    Capacitor,
    Inductor,
}

/// Shared state of the four R+X pairs. `zl` holds the latched incident
/// wave, `zc` the previous reflected wave.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ResistivePair {
    reactance: Reactance,
    series: bool,
    resistance: f64,
    reactive_value: f64,
    sample_rate: f64,
    port_resistance: f64,
    k: f64,
    zl: f64,
    zc: f64,
}

impl ResistivePair {
    fn new(
        reactance: Reactance,
        series: bool,
        resistance: f64,
        reactive_value: f64,
        sample_rate: f64,
    ) -> Self {
        let mut pair = Self {
            reactance,
            series,
            resistance,
            reactive_value,
            sample_rate,
            port_resistance: 0.0,
            k: 0.0,
            zl: 0.0,
            zc: 0.0,
        };
        pair.update_resistances();
        pair
    }

    fn update_resistances(&mut self) {
        let rx = match self.reactance {
            Reactance::Capacitor => capacitor_resistance(self.reactive_value, self.sample_rate),
            Reactance::Inductor => inductor_resistance(self.reactive_value, self.sample_rate),
        };
        self.port_resistance = if self.series {
            self.resistance + rx
        } else {
            1.0 / (1.0 / self.resistance + 1.0 / rx)
        };
        self.k = if self.series {
            self.resistance / self.port_resistance
        } else {
            self.port_resistance / self.resistance
        };
    }

    #[inline]
    fn scatter(&mut self) -> f64 {
        let (k, zc) = (self.k, self.zc);
        let mut out = match (self.reactance, self.series) {
            (Reactance::Capacitor, true) => self.zl * (1.0 - k) + k * zc,
            (Reactance::Capacitor, false) => self.zl * (1.0 - k) - k * zc,
            (Reactance::Inductor, true) => -self.zl * (1.0 - k) - k * zc,
            (Reactance::Inductor, false) => -self.zl * (1.0 - k) + k * zc,
        };
        check_float_underflow(&mut out);
        self.zc = out;
        out
    }

    #[inline]
    fn latch(&mut self, a: f64) {
        self.zl = a;
        check_float_underflow(&mut self.zl);
    }
}

macro_rules! resistive_pair {
    ($(#[$doc:meta])* $name:ident, $reactance:expr, $series:expr, $reactive:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub struct $name {
            inner: ResistivePair,
        }

        impl $name {
            pub fn new(resistance: f64, $reactive: f64, sample_rate: f64) -> Self {
                Self {
                    inner: ResistivePair::new($reactance, $series, resistance, $reactive, sample_rate),
                }
            }

            /// `(resistance, reactive value)`.
            pub fn values(&self) -> (f64, f64) {
                (self.inner.resistance, self.inner.reactive_value)
            }

            pub fn set_values(&mut self, resistance: f64, $reactive: f64) {
                self.inner.resistance = resistance;
                self.inner.reactive_value = $reactive;
                self.inner.update_resistances();
            }
        }

        impl WdfLeaf for $name {
            #[inline]
            fn port_resistance(&self) -> f64 {
                self.inner.port_resistance
            }

            #[inline]
            fn reflected(&mut self) -> f64 {
                self.inner.scatter()
            }

            #[inline]
            fn set_incident(&mut self, a: f64) {
                self.inner.latch(a);
            }

            fn set_sample_rate(&mut self, sample_rate: f64) {
                self.inner.sample_rate = sample_rate;
                self.inner.update_resistances();
            }

            fn clear(&mut self) {
                self.inner.zl = 0.0;
                self.inner.zc = 0.0;
            }

            fn registers(&self) -> [f64; 2] {
                [self.inner.zl, self.inner.zc]
            }
        }
    };
}

resistive_pair!(
    /// Series RC pair.
    ///
    /// `Rp = R + R_C`, `K = R / Rp`
    /// `b = zL (1 - K) + K zC;  zC <- b`
    SeriesRc,
    Reactance::Capacitor,
    true,
    capacitance
);

resistive_pair!(
    /// Parallel RC pair.
    ///
    /// `Rp = 1 / (1/R + 1/R_C)`, `K = Rp / R`
    /// `b = zL (1 - K) - K zC;  zC <- b`
    ParallelRc,
    Reactance::Capacitor,
    false,
    capacitance
);

resistive_pair!(
    /// Series RL pair.
    ///
    /// `Rp = R + R_L`, `K = R / Rp`
    /// `b = -zL (1 - K) - K zC;  zC <- b`
    SeriesRl,
    Reactance::Inductor,
    true,
    inductance
);

resistive_pair!(
    /// Parallel RL pair.
    ///
    /// `Rp = 1 / (1/R + 1/R_L)`, `K = Rp / R`
    /// `b = -zL (1 - K) + K zC;  zC <- b`
    ParallelRl,
    Reactance::Inductor,
    false,
    inductance
);
