use super::FilterArgs;
use std::path::Path;
use wdfladder::wav::{read_wav_mono, write_wav};
use wdfladder::AudioProcessor;

pub fn run(input: &str, output: &str, args: &FilterArgs) -> Result<(), Box<dyn std::error::Error>> {
    let preset = args.preset()?;

    let (samples, sample_rate) = read_wav_mono(Path::new(input))?;
    eprintln!(
        "Input: {} ({} samples, {} Hz)",
        input,
        samples.len(),
        sample_rate,
    );

    let mut filter = preset.build_at(sample_rate as f64)?;
    let params = filter.filter.parameters();
    eprintln!(
        "Filter: {} (fc = {} Hz, Q = {}, warping {}, gain {})",
        preset.kind.name(),
        params.fc,
        params.q,
        if params.frequency_warping { "on" } else { "off" },
        preset.gain,
    );

    let mut buffer = samples;
    filter.process_block(&mut buffer);

    let peak = buffer.iter().fold(0.0_f64, |m, s| m.max(s.abs()));
    if peak > 1.0 {
        eprintln!("Warning: output peaks at {peak:.3}, WAV will clip on playback");
    }

    write_wav(&buffer, Path::new(output), sample_rate)?;
    eprintln!("Output: {output}");
    Ok(())
}
