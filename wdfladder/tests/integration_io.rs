//! Presets and WAV rendering end to end.


use audio_analysis::*;
use wdfladder::config::FilterPreset;
use wdfladder::filters::FilterKind;
use wdfladder::wav::{read_wav_mono, render_to_wav, write_wav};
use wdfladder::AudioProcessor;

#[test]
fn preset_file_builds_tuned_filter() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lpf.yaml");
    std::fs::write(
        &path,
        "kind: ideal_rlc_lpf\nsample_rate: 44100\ngain: 0.5\nparameters:\n  fc: 100.0\n  q: 0.707\n",
    )
    .unwrap();

    let preset = FilterPreset::load(&path).unwrap();
    let mut filter = preset.build().unwrap();
    assert_eq!(filter.filter.kind(), FilterKind::IdealRlcLpf);

    let out = process(&mut filter, &vec![1.0; 20_000]);
    let y = *out.last().unwrap();
    assert!((y + 0.5).abs() < 1e-6, "gained dc {y}");
}

#[test]
fn render_filters_a_wav_file() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");

    let fs = 44_100_u32;
    let input: Vec<f64> = sine(5_000.0, 0.5, 22_050, fs as f64);
    write_wav(&input, &input_path, fs).unwrap();
    let (samples, rate) = read_wav_mono(&input_path).unwrap();
    assert_eq!(rate, fs);

    let mut preset = FilterPreset::new(FilterKind::ButterLpf3);
    preset.parameters.fc = 500.0;
    let mut filter = preset.build_at(rate as f64).unwrap();
    render_to_wav(&mut filter, &samples, &output_path, rate).unwrap();

    let (rendered, _) = read_wav_mono(&output_path).unwrap();
    assert_eq!(rendered.len(), samples.len());
    // Three octaves above a 3rd-order corner: more than 50 dB down.
    let tail = peak(&rendered[11_025..]);
    assert!(db(tail / 0.5) < -50.0, "5 kHz leak {:.1} dB", db(tail / 0.5));
}

#[test]
fn process_block_matches_per_sample() {
    let preset = FilterPreset::new(FilterKind::IdealRlcBsf);
    let mut a = preset.build().unwrap();
    let mut b = preset.build().unwrap();
    let input = sine(60.0, 0.9, 1_000, SAMPLE_RATE);

    let expected = process(&mut a, &input);
    let mut block = input.clone();
    b.process_block(&mut block);
    assert_eq!(block, expected);
}
