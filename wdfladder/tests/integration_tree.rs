//! Adaptor-network wiring and initialization through the public API.


use audio_analysis::*;
use wdfladder::elements::{ComponentKind, ComponentSpec, WdfLeaf};
use wdfladder::filters::{IdealRlcConfig, IdealRlcFilter, RlcResponse};
use wdfladder::params::WdfParameters;
use wdfladder::tree::{JunctionKind, Termination, WdfTree};
use wdfladder::{AudioProcessor, WdfError};

fn ladder(fs: f64) -> (WdfTree, [wdfladder::tree::AdaptorId; 4]) {
    let mut tree = WdfTree::new(fs);
    let a = tree.add_adaptor(JunctionKind::Series);
    let b = tree.add_adaptor(JunctionKind::Parallel);
    let c = tree.add_adaptor(JunctionKind::Series);
    let d = tree.add_adaptor(JunctionKind::ParallelTerminated);
    tree.set_component(a, ComponentSpec::Resistor { resistance: 100.0 })
        .unwrap();
    tree.set_component(b, ComponentSpec::Capacitor { capacitance: 1e-6 })
        .unwrap();
    tree.set_component(
        c,
        ComponentSpec::SeriesRl {
            resistance: 47.0,
            inductance: 0.01,
        },
    )
    .unwrap();
    tree.set_component(
        d,
        ComponentSpec::ParallelRc {
            resistance: 1000.0,
            capacitance: 2.2e-7,
        },
    )
    .unwrap();
    tree.connect_adaptors(a, b).unwrap();
    tree.connect_adaptors(b, c).unwrap();
    tree.connect_adaptors(c, d).unwrap();
    tree.set_source_resistance(a, 50.0).unwrap();
    tree.set_terminal_resistance(d, 10_000.0).unwrap();
    (tree, [a, b, c, d])
}

#[test]
fn downstream_resistances_follow_junction_rules() {
    let (mut tree, [a, b, c, d]) = ladder(SAMPLE_RATE);
    tree.initialize_adaptor_chain(a).unwrap();

    let r3 = |id| {
        tree.component(id)
            .unwrap()
            .map(|comp| comp.port_resistance())
            .unwrap()
    };

    let r2_a = 50.0 + 100.0;
    assert!((tree.r2(a).unwrap() - r2_a).abs() < 1e-9);

    let r2_b = 1.0 / (1.0 / r2_a + 1.0 / r3(b));
    assert!((tree.r1(b).unwrap() - r2_a).abs() < 1e-9);
    assert!((tree.r2(b).unwrap() - r2_b).abs() < 1e-9);

    let r2_c = r2_b + r3(c);
    assert!((tree.r2(c).unwrap() - r2_c).abs() < 1e-9);

    let r2_d = 1.0 / (1.0 / r2_c + 1.0 / r3(d));
    assert!((tree.r1(d).unwrap() - r2_c).abs() < 1e-9);
    assert!((tree.r2(d).unwrap() - r2_d).abs() < 1e-9);
}

#[test]
fn sample_rate_change_rescales_reactive_ports() {
    let (mut tree, [a, b, ..]) = ladder(SAMPLE_RATE);
    tree.initialize_adaptor_chain(a).unwrap();
    let before = tree.r3(b).unwrap();
    assert!(tree.reset(2.0 * SAMPLE_RATE));
    tree.initialize_adaptor_chain(a).unwrap();
    assert!((tree.r3(b).unwrap() - before / 2.0).abs() < 1e-9);
}

#[test]
fn ladder_stays_bounded_and_decays() {
    let (mut tree, [a, _, _, d]) = ladder(SAMPLE_RATE);
    tree.initialize_adaptor_chain(a).unwrap();
    let mut last = 0.0;
    for i in 0..40_000 {
        tree.set_input1(a, if i < 4_000 { 1.0 } else { 0.0 });
        last = tree.output2(d);
        assert!(last.is_finite());
    }
    assert!(last.abs() < 1e-9, "ladder still ringing: {last}");
}

#[test]
fn hand_wired_bandpass_matches_assembly() {
    let params = WdfParameters::new(700.0, 3.0);
    let mut filter = rlc(RlcResponse::Bandpass, params.fc, params.q, true);
    let values = filter.component_values();

    let mut tree = WdfTree::new(SAMPLE_RATE);
    let series = tree.add_adaptor(JunctionKind::Series);
    let load = tree.add_adaptor(JunctionKind::ParallelTerminated);
    tree.set_component(
        series,
        ComponentSpec::SeriesLc {
            inductance: values.inductance,
            capacitance: values.capacitance,
        },
    )
    .unwrap();
    tree.set_component(
        load,
        ComponentSpec::Resistor {
            resistance: values.resistance,
        },
    )
    .unwrap();
    tree.connect_adaptors(series, load).unwrap();
    tree.set_source_resistance(series, 0.0).unwrap();
    tree.set_open_terminal_resistance(load, true).unwrap();
    tree.initialize_adaptor_chain(series).unwrap();
    assert_eq!(tree.termination(load).unwrap(), Termination::Open);

    for x in sine(500.0, 0.7, 2_000, SAMPLE_RATE) {
        tree.set_input1(series, x);
        let expected = 0.5 * tree.output2(load);
        assert_eq!(filter.process_sample(x), expected);
    }
}

#[test]
fn reflected_wave_reaches_the_head() {
    let (mut tree, [a, ..]) = ladder(SAMPLE_RATE);
    tree.initialize_adaptor_chain(a).unwrap();
    tree.set_input1(a, 1.0);
    // Port-1 wave of the head is written by the backward pass.
    assert!(tree.output1(a) != 0.0);
}

#[test]
fn set_input2_on_head_scatters_into_component() {
    let mut tree = WdfTree::new(SAMPLE_RATE);
    let s = tree.add_adaptor(JunctionKind::Series);
    let t = tree.add_adaptor(JunctionKind::SeriesTerminated);
    tree.set_component(s, ComponentSpec::Capacitor { capacitance: 1e-6 })
        .unwrap();
    tree.connect_adaptors(s, t).unwrap();
    tree.initialize_adaptor_chain(s).unwrap();

    tree.set_input2(s, 0.5);
    let comp = tree.component(s).unwrap().unwrap();
    assert_eq!(comp.kind(), ComponentKind::Capacitor);
    assert!(comp.registers()[0] != 0.0);
    assert_eq!(tree.adaptor(s).unwrap().waves().in2, 0.5);
}

#[test]
fn configuration_errors_are_reported() {
    let mut tree = WdfTree::new(SAMPLE_RATE);
    let a = tree.add_adaptor(JunctionKind::Parallel);
    let b = tree.add_adaptor(JunctionKind::ParallelTerminated);
    tree.connect_adaptors(a, b).unwrap();
    tree.set_source_resistance(a, 0.0).unwrap();
    // A parallel junction cannot be seeded with 0 Ω.
    assert_eq!(
        tree.initialize_adaptor_chain(a),
        Err(WdfError::InvalidResistance(0.0))
    );
    assert!(matches!(
        tree.set_component(a, ComponentSpec::Inductor { inductance: 0.0 }),
        Err(WdfError::InvalidComponentValue { .. })
    ));
}

#[test]
fn series_head_needs_nonzero_series_resistance() {
    let mut tree = WdfTree::new(SAMPLE_RATE);
    let s = tree.add_adaptor(JunctionKind::Series);
    let t = tree.add_adaptor(JunctionKind::SeriesTerminated);
    tree.set_component(t, ComponentSpec::Capacitor { capacitance: 1e-6 })
        .unwrap();
    tree.connect_adaptors(s, t).unwrap();
    tree.set_source_resistance(s, 0.0).unwrap();
    // 0 Ω source and an empty port 3 leave the junction coefficient undefined.
    assert_eq!(
        tree.initialize_adaptor_chain(s),
        Err(WdfError::InvalidResistance(0.0))
    );
    assert!(!tree.is_initialized());

    tree.set_component(s, ComponentSpec::Resistor { resistance: 100.0 })
        .unwrap();
    tree.initialize_adaptor_chain(s).unwrap();
    tree.set_input1(s, 1.0);
    assert!(tree.output1(s).is_finite());
    assert!(tree.output2(t).is_finite());
}

#[test]
fn fresh_filter_processes_silence_to_silence() {
    let mut f = IdealRlcFilter::new(RlcResponse::Highpass, IdealRlcConfig::default()).unwrap();
    let out = process(&mut f, &[0.0; 256]);
    assert!(out.iter().all(|&y| y == 0.0));
}
