pub mod process;
pub mod response;

use clap::Args;
use wdfladder::config::FilterPreset;
use wdfladder::filters::FilterKind;

/// Filter selection shared by every subcommand. Flags override the preset.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Preset YAML to start from.
    #[arg(long)]
    pub preset: Option<String>,
    /// Filter topology.
    #[arg(long, value_enum)]
    pub kind: Option<FilterKind>,
    /// Cutoff / center frequency in Hz.
    #[arg(long)]
    pub fc: Option<f64>,
    /// Resonance (ignored by butter_lpf3).
    #[arg(long)]
    pub q: Option<f64>,
    /// Disable bilinear frequency pre-warping.
    #[arg(long)]
    pub no_warp: bool,
    /// Linear output gain.
    #[arg(long)]
    pub gain: Option<f64>,
}

impl FilterArgs {
    pub fn preset(&self) -> Result<FilterPreset, Box<dyn std::error::Error>> {
        let mut preset = match &self.preset {
            Some(path) => FilterPreset::load(path)?,
            None => FilterPreset::new(self.kind.unwrap_or(FilterKind::IdealRlcLpf)),
        };
        if let Some(kind) = self.kind {
            preset.kind = kind;
        }
        if let Some(fc) = self.fc {
            preset.parameters.fc = fc;
        }
        if let Some(q) = self.q {
            preset.parameters.q = q;
        }
        if self.no_warp {
            preset.parameters.frequency_warping = false;
        }
        if let Some(gain) = self.gain {
            preset.gain = gain;
        }
        Ok(preset)
    }
}

pub fn write_preset(output: &str, args: &FilterArgs) -> Result<(), Box<dyn std::error::Error>> {
    let preset = args.preset()?;
    preset.save(output)?;
    eprintln!("Wrote {} preset to {output}", preset.kind.name());
    Ok(())
}
