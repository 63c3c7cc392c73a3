use super::FilterArgs;
use wdfladder::analysis::{log_frequencies, magnitude_response_db};

pub fn run(
    args: &FilterArgs,
    sample_rate: Option<f64>,
    points: usize,
    min_freq: f64,
    max_freq: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let preset = args.preset()?;
    let fs = sample_rate.unwrap_or(preset.sample_rate);
    let mut filter = preset.build_at(fs)?;

    let hi = max_freq.min(0.45 * fs);
    if !(min_freq > 0.0 && min_freq < hi) {
        return Err(format!("invalid frequency range {min_freq}..{hi} Hz").into());
    }
    let freqs = log_frequencies(min_freq, hi, points);

    let params = filter.filter.parameters();
    println!(
        "# {} fc={} Hz Q={} fs={} Hz",
        preset.kind.name(),
        params.fc,
        params.q,
        fs
    );
    println!("{:>12}  {:>9}", "freq_hz", "gain_db");
    for (f, db) in magnitude_response_db(&mut filter, &freqs, fs) {
        println!("{f:>12.2}  {db:>9.3}");
    }
    Ok(())
}
