//! wdfladder: wave digital filter models of passive RLC ladder circuits.
//!
//! # Modules
//!
//! - [`elements`]: one-port components (R, L, C and the six two-element pairs)
//! - [`tree`]: series/parallel scattering junctions and the adaptor arena
//! - [`filters`]: ideal RLC filters and the 3rd-order Butterworth ladder
//! - [`params`]: filter parameters, frequency pre-warping, underflow clamp
//! - [`config`]: YAML filter presets
//! - [`wav`]: WAV file I/O for offline rendering
//! - [`analysis`]: steady-state magnitude response measurement
//!
//! # Example
//!
//! ```
//! use wdfladder::filters::IdealRlcFilter;
//! use wdfladder::params::WdfParameters;
//! use wdfladder::AudioProcessor;
//!
//! let mut lpf = IdealRlcFilter::lowpass().unwrap();
//! lpf.reset(48_000.0);
//! lpf.set_parameters(WdfParameters::new(800.0, 0.707)).unwrap();
//! let y = lpf.process_sample(1.0);
//! assert!(y.is_finite());
//! ```

pub mod analysis;
pub mod config;
pub mod elements;
pub mod error;
pub mod filters;
pub mod params;
pub mod tree;
pub mod wav;

pub use error::{ConfigError, WdfError};
pub use filters::{ButterLpf3, FilterKind, IdealRlcFilter, RlcResponse, WdfFilter};
pub use params::WdfParameters;

/// Sample-by-sample audio processor.
pub trait AudioProcessor {
    /// Clear all state and prepare for `sample_rate`.
    ///
    /// Returns `false` (leaving the processor unchanged) when the rate is
    /// not finite and positive.
    fn reset(&mut self, sample_rate: f64) -> bool;

    /// Process a single sample.
    fn process_sample(&mut self, xn: f64) -> f64;

    /// Process a buffer in place.
    fn process_block(&mut self, buffer: &mut [f64]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }
}
