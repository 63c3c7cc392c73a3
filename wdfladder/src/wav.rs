//! WAV file I/O for offline rendering.
//!
//! Output is always mono 32-bit float. Input may be any integer or float
//! format `hound` reads; multi-channel files are averaged down to mono.

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

use crate::AudioProcessor;

fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

/// Read a WAV file as mono `f64` samples in [-1, 1]. Returns the samples
/// and the file's sample rate.
pub fn read_wav_mono(path: &Path) -> Result<(Vec<f64>, u32), Box<dyn std::error::Error>> {
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f64> = match spec.sample_format {
        SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    let mono = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f64>() / frame.len() as f64)
        .collect();
    Ok((mono, spec.sample_rate))
}

/// Write raw f64 samples to a WAV file.
pub fn write_wav(
    samples: &[f64],
    path: &Path,
    sample_rate: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = WavWriter::create(path, wav_spec(sample_rate))?;
    for &s in samples {
        writer.write_sample(s as f32)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Reset `processor` at `sample_rate`, run `input` through it and write
/// the result to a WAV file.
pub fn render_to_wav<P: AudioProcessor>(
    processor: &mut P,
    input: &[f64],
    path: &Path,
    sample_rate: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    if !processor.reset(sample_rate as f64) {
        return Err(format!("invalid sample rate {sample_rate}").into());
    }
    let mut writer = WavWriter::create(path, wav_spec(sample_rate))?;
    for &sample in input {
        writer.write_sample(processor.process_sample(sample) as f32)?;
    }
    writer.finalize()?;
    Ok(())
}
