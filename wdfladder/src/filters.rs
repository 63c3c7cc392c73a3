//! Ready-to-use WDF filter assemblies.
//!
//! - [`IdealRlcFilter`]: 2nd-order RLC low/high/band-pass and band-stop
//! - [`ButterLpf3`]: 3rd-order doubly terminated Butterworth ladder
//! - [`WdfFilter`]: closed dispatch over both, selected by [`FilterKind`]
//!
//! Each assembly owns one [`WdfTree`], wires it once at construction and
//! re-runs the resistance pass whenever component values change.

use crate::elements::ComponentSpec;
use crate::error::WdfError;
use crate::params::{WdfParameters, DEFAULT_PORT_RESISTANCE, DEFAULT_SAMPLE_RATE};
use crate::tree::{AdaptorId, JunctionKind, WdfTree};
use crate::AudioProcessor;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, warn};

/// Reject parameter sets the analog-prototype mapping cannot realize.
fn validate_parameters(params: &WdfParameters, sample_rate: f64) -> Result<(), WdfError> {
    let fc = params.fc;
    if !(fc.is_finite() && fc > 0.0) {
        return Err(WdfError::InvalidParameter { name: "fc", value: fc });
    }
    if fc >= 0.5 * sample_rate {
        return Err(WdfError::InvalidParameter { name: "fc", value: fc });
    }
    if !(params.q.is_finite() && params.q > 0.0) {
        return Err(WdfError::InvalidParameter {
            name: "q",
            value: params.q,
        });
    }
    if !params.boost_cut_db.is_finite() {
        return Err(WdfError::InvalidParameter {
            name: "boost_cut_db",
            value: params.boost_cut_db,
        });
    }
    Ok(())
}

// ===========================================================================
// Ideal RLC
// ===========================================================================

/// Component values an [`IdealRlcFilter`] starts from.
///
/// The defaults put the corner near 1 kHz with Q ≈ 0.707. The capacitance
/// also stays fixed when parameters are applied; L and R are derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdealRlcConfig {
    pub inductance: f64,
    pub capacitance: f64,
    pub resistance: f64,
}

impl Default for IdealRlcConfig {
    fn default() -> Self {
        Self {
            inductance: 2.533e-2,
            capacitance: 1.0e-6,
            resistance: 2.251131e2,
        }
    }
}

impl IdealRlcConfig {
    /// Values realizing `params` at `sample_rate`, keeping this capacitance.
    ///
    /// `L = 1 / (C (2π fc)^2)`, `R = (1/Q) sqrt(L / C)`
    pub fn tuned(&self, params: &WdfParameters, sample_rate: f64) -> Self {
        let fc = params.prototype_fc(sample_rate);
        let c = self.capacitance;
        let omega = 2.0 * PI * fc;
        let l = 1.0 / (c * omega * omega);
        let r = (1.0 / params.q) * (l / c).sqrt();
        Self {
            inductance: l,
            capacitance: c,
            resistance: r,
        }
    }

    /// Analog resonance `1 / (2π sqrt(LC))`.
    pub fn resonant_frequency(&self) -> f64 {
        1.0 / (2.0 * PI * (self.inductance * self.capacitance).sqrt())
    }

    /// Series-RLC quality factor `sqrt(L/C) / R`.
    pub fn quality(&self) -> f64 {
        (self.inductance / self.capacitance).sqrt() / self.resistance
    }
}

/// Which voltage an [`IdealRlcFilter`] taps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RlcResponse {
    /// Across C, with R and L in series before it.
    Lowpass,
    /// Across L, with R and C in series before it.
    Highpass,
    /// Across R, with L and C in series before it.
    Bandpass,
    /// Across the series LC, with R before it.
    Bandstop,
}

impl RlcResponse {
    /// `(series adaptor component, terminated adaptor component)`.
    fn components(self, v: &IdealRlcConfig) -> (ComponentSpec, ComponentSpec) {
        let IdealRlcConfig {
            inductance,
            capacitance,
            resistance,
        } = *v;
        match self {
            RlcResponse::Lowpass => (
                ComponentSpec::SeriesRl {
                    resistance,
                    inductance,
                },
                ComponentSpec::Capacitor { capacitance },
            ),
            RlcResponse::Highpass => (
                ComponentSpec::SeriesRc {
                    resistance,
                    capacitance,
                },
                ComponentSpec::Inductor { inductance },
            ),
            RlcResponse::Bandpass => (
                ComponentSpec::SeriesLc {
                    inductance,
                    capacitance,
                },
                ComponentSpec::Resistor { resistance },
            ),
            RlcResponse::Bandstop => (
                ComponentSpec::Resistor { resistance },
                ComponentSpec::SeriesLc {
                    inductance,
                    capacitance,
                },
            ),
        }
    }
}

/// Second-order RLC filter: a series adaptor feeding an open-terminated
/// parallel adaptor, driven from an ideal (0 Ω) source.
///
/// `y = 0.5 * out2` of the terminated adaptor. The tap is polarity
/// inverted, so the low-pass settles to `-x` for a constant input `x`.
#[derive(Debug, Clone)]
pub struct IdealRlcFilter {
    response: RlcResponse,
    config: IdealRlcConfig,
    values: IdealRlcConfig,
    params: WdfParameters,
    applied: bool,
    tree: WdfTree,
    series: AdaptorId,
    terminal: AdaptorId,
}

impl IdealRlcFilter {
    /// Build and initialize the network at the default sample rate.
    pub fn new(response: RlcResponse, config: IdealRlcConfig) -> Result<Self, WdfError> {
        let mut tree = WdfTree::new(DEFAULT_SAMPLE_RATE);
        let series = tree.add_adaptor(JunctionKind::Series);
        let terminal = tree.add_adaptor(JunctionKind::ParallelTerminated);

        let (upper, lower) = response.components(&config);
        tree.set_component(series, upper)?;
        tree.set_component(terminal, lower)?;
        tree.connect_adaptors(series, terminal)?;
        tree.set_source_resistance(series, 0.0)?;
        tree.set_open_terminal_resistance(terminal, true)?;
        tree.initialize_adaptor_chain(series)?;

        Ok(Self {
            response,
            config,
            values: config,
            params: WdfParameters::default(),
            applied: false,
            tree,
            series,
            terminal,
        })
    }

    pub fn lowpass() -> Result<Self, WdfError> {
        Self::new(RlcResponse::Lowpass, IdealRlcConfig::default())
    }

    pub fn highpass() -> Result<Self, WdfError> {
        Self::new(RlcResponse::Highpass, IdealRlcConfig::default())
    }

    pub fn bandpass() -> Result<Self, WdfError> {
        Self::new(RlcResponse::Bandpass, IdealRlcConfig::default())
    }

    pub fn bandstop() -> Result<Self, WdfError> {
        Self::new(RlcResponse::Bandstop, IdealRlcConfig::default())
    }

    pub fn response(&self) -> RlcResponse {
        self.response
    }

    pub fn parameters(&self) -> WdfParameters {
        self.params
    }

    /// Component values currently loaded into the network.
    pub fn component_values(&self) -> IdealRlcConfig {
        self.values
    }

    pub fn tree(&self) -> &WdfTree {
        &self.tree
    }

    pub fn series_adaptor(&self) -> AdaptorId {
        self.series
    }

    pub fn terminal_adaptor(&self) -> AdaptorId {
        self.terminal
    }

    /// Apply new parameters.
    ///
    /// Returns `Ok(false)` without touching the network when `params` equal
    /// the last applied set. Otherwise derives L and R from fc and Q, loads
    /// them and re-initializes the chain. Nothing changes on error.
    pub fn set_parameters(&mut self, params: WdfParameters) -> Result<bool, WdfError> {
        if self.applied && params == self.params {
            return Ok(false);
        }
        let fs = self.tree.sample_rate();
        if let Err(e) = validate_parameters(&params, fs) {
            warn!(?params, error = %e, "rejected ideal RLC parameters");
            return Err(e);
        }
        let values = self.config.tuned(&params, fs);
        self.load_values(values)?;
        self.params = params;
        self.applied = true;
        debug!(
            response = ?self.response,
            fc = params.fc,
            q = params.q,
            l = values.inductance,
            r = values.resistance,
            "ideal RLC parameters applied"
        );
        Ok(true)
    }

    /// Whether the applied parameters can be re-derived at `sample_rate`.
    /// If they cannot, they stop counting as applied, so the next
    /// `set_parameters` call validates again and reports the error.
    fn retune_at(&mut self, sample_rate: f64) -> bool {
        if !self.applied {
            return false;
        }
        if let Err(e) = validate_parameters(&self.params, sample_rate) {
            warn!(
                params = ?self.params,
                sample_rate,
                error = %e,
                "applied parameters invalid at new sample rate"
            );
            self.applied = false;
            return false;
        }
        true
    }

    fn load_values(&mut self, values: IdealRlcConfig) -> Result<(), WdfError> {
        let (upper, lower) = self.response.components(&values);
        upper.validate()?;
        lower.validate()?;
        self.tree.set_component_values(self.series, upper)?;
        self.tree.set_component_values(self.terminal, lower)?;
        self.tree.initialize_adaptor_chain(self.series)?;
        self.values = values;
        Ok(())
    }
}

impl AudioProcessor for IdealRlcFilter {
    fn reset(&mut self, sample_rate: f64) -> bool {
        if !self.tree.reset(sample_rate) {
            warn!(sample_rate, "ignoring reset to invalid sample rate");
            return false;
        }
        let values = if self.retune_at(sample_rate) {
            self.config.tuned(&self.params, sample_rate)
        } else {
            self.values
        };
        self.load_values(values).is_ok()
    }

    #[inline]
    fn process_sample(&mut self, xn: f64) -> f64 {
        self.tree.set_input1(self.series, xn);
        0.5 * self.tree.output2(self.terminal)
    }
}

// ===========================================================================
// Butterworth ladder
// ===========================================================================

/// Element values of the 3rd-order Butterworth ladder, normalized to a
/// 1 Hz cutoff between matched 600 Ω terminations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButterLadderConfig {
    /// Series inductor on the source side (H at 1 Hz).
    pub l1: f64,
    /// Shunt capacitor (F at 1 Hz).
    pub c1: f64,
    /// Series inductor on the load side (H at 1 Hz).
    pub l2: f64,
    pub source_resistance: f64,
    pub load_resistance: f64,
    /// Cutoff the ladder is built at, before any parameters are applied.
    pub cutoff_hz: f64,
}

impl Default for ButterLadderConfig {
    fn default() -> Self {
        Self {
            l1: 95.49,
            c1: 0.5305e-3,
            l2: 95.49,
            source_resistance: DEFAULT_PORT_RESISTANCE,
            load_resistance: DEFAULT_PORT_RESISTANCE,
            cutoff_hz: 1000.0,
        }
    }
}

impl ButterLadderConfig {
    /// `(L1, C1, L2)` frequency-scaled to `fc`.
    pub fn scaled(&self, fc: f64) -> (f64, f64, f64) {
        (self.l1 / fc, self.c1 / fc, self.l2 / fc)
    }
}

/// Third-order Butterworth low-pass ladder.
///
/// ```text
/// Rs ──L1──┬──L2── RL
///          C1
///          ┴
/// ```
///
/// Series(L1) → Parallel(C1) → SeriesTerminated(L2). `y = out2` of the
/// terminated adaptor, unity at DC. Only `fc` and the warping flag are
/// used from [`WdfParameters`].
#[derive(Debug, Clone)]
pub struct ButterLpf3 {
    config: ButterLadderConfig,
    values: (f64, f64, f64),
    params: WdfParameters,
    applied: bool,
    tree: WdfTree,
    l1: AdaptorId,
    c1: AdaptorId,
    l2: AdaptorId,
}

impl ButterLpf3 {
    pub fn new(config: ButterLadderConfig) -> Result<Self, WdfError> {
        if !(config.cutoff_hz.is_finite() && config.cutoff_hz > 0.0) {
            return Err(WdfError::InvalidParameter {
                name: "cutoff_hz",
                value: config.cutoff_hz,
            });
        }
        let (l1, c1, l2) = config.scaled(config.cutoff_hz);

        let mut tree = WdfTree::new(DEFAULT_SAMPLE_RATE);
        let a1 = tree.add_adaptor(JunctionKind::Series);
        let a2 = tree.add_adaptor(JunctionKind::Parallel);
        let a3 = tree.add_adaptor(JunctionKind::SeriesTerminated);
        tree.set_component(a1, ComponentSpec::Inductor { inductance: l1 })?;
        tree.set_component(a2, ComponentSpec::Capacitor { capacitance: c1 })?;
        tree.set_component(a3, ComponentSpec::Inductor { inductance: l2 })?;
        tree.connect_adaptors(a1, a2)?;
        tree.connect_adaptors(a2, a3)?;
        tree.set_source_resistance(a1, config.source_resistance)?;
        tree.set_terminal_resistance(a3, config.load_resistance)?;
        tree.initialize_adaptor_chain(a1)?;

        Ok(Self {
            config,
            values: (l1, c1, l2),
            params: WdfParameters {
                fc: config.cutoff_hz,
                ..WdfParameters::default()
            },
            applied: false,
            tree,
            l1: a1,
            c1: a2,
            l2: a3,
        })
    }

    pub fn parameters(&self) -> WdfParameters {
        self.params
    }

    /// Currently loaded `(L1, C1, L2)`.
    pub fn component_values(&self) -> (f64, f64, f64) {
        self.values
    }

    /// Terminations and normalized element values.
    pub fn config(&self) -> &ButterLadderConfig {
        &self.config
    }

    pub fn tree(&self) -> &WdfTree {
        &self.tree
    }

    /// Frequency-scale the ladder to `params.fc` (pre-warped when enabled).
    /// Same no-op and error semantics as [`IdealRlcFilter::set_parameters`].
    pub fn set_parameters(&mut self, params: WdfParameters) -> Result<bool, WdfError> {
        if self.applied && params == self.params {
            return Ok(false);
        }
        let fs = self.tree.sample_rate();
        if let Err(e) = validate_parameters(&params, fs) {
            warn!(?params, error = %e, "rejected Butterworth parameters");
            return Err(e);
        }
        let values = self.config.scaled(params.prototype_fc(fs));
        self.load_values(values)?;
        self.params = params;
        self.applied = true;
        debug!(fc = params.fc, warped = params.frequency_warping, "Butterworth ladder retuned");
        Ok(true)
    }

    /// Whether the applied parameters can be re-derived at `sample_rate`.
    /// If they cannot, they stop counting as applied, so the next
    /// `set_parameters` call validates again and reports the error.
    fn retune_at(&mut self, sample_rate: f64) -> bool {
        if !self.applied {
            return false;
        }
        if let Err(e) = validate_parameters(&self.params, sample_rate) {
            warn!(
                params = ?self.params,
                sample_rate,
                error = %e,
                "applied parameters invalid at new sample rate"
            );
            self.applied = false;
            return false;
        }
        true
    }

    fn load_values(&mut self, (l1, c1, l2): (f64, f64, f64)) -> Result<(), WdfError> {
        let specs = [
            ComponentSpec::Inductor { inductance: l1 },
            ComponentSpec::Capacitor { capacitance: c1 },
            ComponentSpec::Inductor { inductance: l2 },
        ];
        for spec in &specs {
            spec.validate()?;
        }
        for (id, spec) in [self.l1, self.c1, self.l2].into_iter().zip(specs) {
            self.tree.set_component_values(id, spec)?;
        }
        self.tree.initialize_adaptor_chain(self.l1)?;
        self.values = (l1, c1, l2);
        Ok(())
    }
}

impl AudioProcessor for ButterLpf3 {
    fn reset(&mut self, sample_rate: f64) -> bool {
        if !self.tree.reset(sample_rate) {
            warn!(sample_rate, "ignoring reset to invalid sample rate");
            return false;
        }
        let values = if self.retune_at(sample_rate) {
            self.config.scaled(self.params.prototype_fc(sample_rate))
        } else {
            self.values
        };
        self.load_values(values).is_ok()
    }

    #[inline]
    fn process_sample(&mut self, xn: f64) -> f64 {
        self.tree.set_input1(self.l1, xn);
        self.tree.output2(self.l2)
    }
}

// ===========================================================================
// Dispatch
// ===========================================================================

/// Filter selector, mirroring a host's filter-type switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum FilterKind {
    IdealRlcLpf,
    IdealRlcHpf,
    IdealRlcBpf,
    IdealRlcBsf,
    ButterLpf3,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::IdealRlcLpf,
        FilterKind::IdealRlcHpf,
        FilterKind::IdealRlcBpf,
        FilterKind::IdealRlcBsf,
        FilterKind::ButterLpf3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::IdealRlcLpf => "ideal_rlc_lpf",
            FilterKind::IdealRlcHpf => "ideal_rlc_hpf",
            FilterKind::IdealRlcBpf => "ideal_rlc_bpf",
            FilterKind::IdealRlcBsf => "ideal_rlc_bsf",
            FilterKind::ButterLpf3 => "butter_lpf3",
        }
    }

    pub fn rlc_response(self) -> Option<RlcResponse> {
        match self {
            FilterKind::IdealRlcLpf => Some(RlcResponse::Lowpass),
            FilterKind::IdealRlcHpf => Some(RlcResponse::Highpass),
            FilterKind::IdealRlcBpf => Some(RlcResponse::Bandpass),
            FilterKind::IdealRlcBsf => Some(RlcResponse::Bandstop),
            FilterKind::ButterLpf3 => None,
        }
    }
}

/// Any of the filter assemblies, behind one [`AudioProcessor`].
#[derive(Debug, Clone)]
pub enum WdfFilter {
    IdealRlc(IdealRlcFilter),
    ButterLpf3(ButterLpf3),
}

impl WdfFilter {
    pub fn build(
        kind: FilterKind,
        rlc: IdealRlcConfig,
        butter: ButterLadderConfig,
    ) -> Result<Self, WdfError> {
        Ok(match kind.rlc_response() {
            Some(response) => WdfFilter::IdealRlc(IdealRlcFilter::new(response, rlc)?),
            None => WdfFilter::ButterLpf3(ButterLpf3::new(butter)?),
        })
    }

    pub fn kind(&self) -> FilterKind {
        match self {
            WdfFilter::IdealRlc(f) => match f.response() {
                RlcResponse::Lowpass => FilterKind::IdealRlcLpf,
                RlcResponse::Highpass => FilterKind::IdealRlcHpf,
                RlcResponse::Bandpass => FilterKind::IdealRlcBpf,
                RlcResponse::Bandstop => FilterKind::IdealRlcBsf,
            },
            WdfFilter::ButterLpf3(_) => FilterKind::ButterLpf3,
        }
    }

    pub fn set_parameters(&mut self, params: WdfParameters) -> Result<bool, WdfError> {
        match self {
            WdfFilter::IdealRlc(f) => f.set_parameters(params),
            WdfFilter::ButterLpf3(f) => f.set_parameters(params),
        }
    }

    pub fn parameters(&self) -> WdfParameters {
        match self {
            WdfFilter::IdealRlc(f) => f.parameters(),
            WdfFilter::ButterLpf3(f) => f.parameters(),
        }
    }

    pub fn tree(&self) -> &WdfTree {
        match self {
            WdfFilter::IdealRlc(f) => f.tree(),
            WdfFilter::ButterLpf3(f) => f.tree(),
        }
    }
}

impl AudioProcessor for WdfFilter {
    fn reset(&mut self, sample_rate: f64) -> bool {
        match self {
            WdfFilter::IdealRlc(f) => f.reset(sample_rate),
            WdfFilter::ButterLpf3(f) => f.reset(sample_rate),
        }
    }

    #[inline]
    fn process_sample(&mut self, xn: f64) -> f64 {
        match self {
            WdfFilter::IdealRlc(f) => f.process_sample(xn),
            WdfFilter::ButterLpf3(f) => f.process_sample(xn),
        }
    }
}

/// A filter followed by a linear output gain.
#[derive(Debug, Clone)]
pub struct GainedFilter {
    pub filter: WdfFilter,
    pub gain: f64,
}

impl AudioProcessor for GainedFilter {
    fn reset(&mut self, sample_rate: f64) -> bool {
        self.filter.reset(sample_rate)
    }

    #[inline]
    fn process_sample(&mut self, xn: f64) -> f64 {
        self.gain * self.filter.process_sample(xn)
    }
}
