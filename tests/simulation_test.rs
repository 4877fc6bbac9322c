use itertools::Itertools;

use lif_net::network::Network;
use lif_net::neuron::LifParameters;
use lif_net::stimulus::{SinusoidalCurrent, StepCurrent};

#[test]
fn test_random_connectivity_edge_counts() {
    let network = Network::rand(40, 0.0, 5.0, 42).unwrap();
    assert_eq!(network.connectivity().num_connections(), 0);

    let network = Network::rand(40, 1.0, 5.0, 42).unwrap();
    assert_eq!(network.connectivity().num_connections(), 40 * 39);
}

#[test]
fn test_quiescence_without_stimulus() {
    let mut network = Network::rand(50, 0.3, 5.0, 42).unwrap();
    let traces = network.run(300.0, 1.0, &|_: f64| 0.0, &[0, 25, 49]).unwrap();

    assert!(traces.is_complete());
    for trace in traces.traces() {
        assert_eq!(trace.len(), 300);
        assert!(trace.potential().iter().all(|&(_, v)| v == 0.0));
        assert!(trace.current().iter().all(|&(_, i)| i == 0.0));
    }
}

#[test]
fn test_isolated_neuron_spikes_and_holds_reset() {
    let params = LifParameters::default();
    let mut network = Network::rand(1, 0.0, 5.0, 42).unwrap();
    let stimulus = StepCurrent::new(10.0, 90.0, 2.0);
    let traces = network.run(100.0, 1.0, &stimulus, &[0]).unwrap();
    let potential = traces.trace(0).unwrap().potential();

    // The 2 nA step converges toward R * I = 40 mV and must cross the threshold.
    let rise = potential
        .iter()
        .position(|&(_, v)| v > 0.0)
        .expect("the neuron must depolarize");
    let spike_idx = rise
        + potential[rise..]
            .iter()
            .position(|&(_, v)| v == params.v_reset)
            .expect("the neuron must spike and reset");

    // The potential is held at v_reset for the reset sample plus tau_ref = 4 ms.
    for idx in spike_idx..spike_idx + 5 {
        assert_eq!(potential[idx].1, params.v_reset);
    }
    assert!(potential[spike_idx + 5].1 > params.v_reset);
}

#[test]
fn test_subthreshold_step_response() {
    let mut network = Network::rand(1, 0.0, 5.0, 42).unwrap();
    let stimulus = StepCurrent::new(20.0, 70.0, 1.0);
    let traces = network.run(100.0, 1.0, &stimulus, &[0]).unwrap();
    let potential = traces.trace(0).unwrap().potential();
    assert_eq!(potential.len(), 100);

    // Amplitude * R = 20 mV < v_threshold = 30 mV: no spike, monotone rise while the
    // current is on, decay after it turns off.
    assert!(potential.iter().all(|&(_, v)| v < 30.0));
    assert!(potential[..21].iter().all(|&(_, v)| v == 0.0));
    assert!(potential[20..72]
        .iter()
        .tuple_windows()
        .all(|(&(_, v1), &(_, v2))| v2 >= v1));
    assert!(potential[71].1 > 0.0);
    assert!(potential[72..]
        .iter()
        .tuple_windows()
        .all(|(&(_, v1), &(_, v2))| v2 < v1));
}

#[test]
fn test_zero_amplitude_sinusoid_is_zero_current() {
    let stimulus = SinusoidalCurrent::new(0.0, 0.25, 1.0, 0.0);
    let mut network = Network::rand(20, 0.3, 5.0, 42).unwrap();
    let traces = network.run(300.0, 1.0, &stimulus, &[0, 10]).unwrap();

    let mut network = Network::rand(20, 0.3, 5.0, 42).unwrap();
    let reference = network.run(300.0, 1.0, &|_: f64| 0.0, &[0, 10]).unwrap();

    assert_eq!(traces, reference);
}

#[test]
fn test_determinism_across_runs() {
    let stimulus = StepCurrent::new(20.0, 70.0, 1.5);

    let mut network = Network::rand(50, 0.3, 5.0, 42).unwrap();
    let first = network.run(300.0, 1.0, &stimulus, &[0, 1, 2]).unwrap();

    let mut network = Network::rand(50, 0.3, 5.0, 42).unwrap();
    let second = network.run(300.0, 1.0, &stimulus, &[0, 1, 2]).unwrap();
    assert_eq!(first, second);

    // Resetting the state bank reproduces the run on the same topology.
    network.reset();
    let third = network.run(300.0, 1.0, &stimulus, &[0, 1, 2]).unwrap();
    assert_eq!(first, third);
}

#[test]
fn test_driven_network_produces_spikes() {
    // Strong drive and excitatory coupling: the population must spike, and every
    // recorded potential stays within the reset-threshold band.
    let params = LifParameters::default();
    let mut network = Network::rand(100, 0.3, 5.0, 42).unwrap();
    let stimulus = StepCurrent::new(20.0, 250.0, 2.0);
    let traces = network.run(300.0, 1.0, &stimulus, &[0]).unwrap();

    assert!(traces.is_complete());
    let potential = traces.trace(0).unwrap().potential();
    assert!(potential.iter().any(|&(_, v)| v > 0.0));
    assert!(potential
        .iter()
        .all(|&(_, v)| v >= params.v_reset && v < params.v_threshold));
}

#[test]
fn test_save_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("network.json");

    let mut network = Network::rand(20, 0.3, 5.0, 42).unwrap();
    network.save_to(&path).unwrap();
    let mut loaded = Network::load_from(&path).unwrap();
    assert_eq!(network, loaded);

    let stimulus = StepCurrent::new(20.0, 70.0, 2.0);
    let traces = network.run(100.0, 1.0, &stimulus, &[0]).unwrap();
    let loaded_traces = loaded.run(100.0, 1.0, &stimulus, &[0]).unwrap();
    assert_eq!(traces, loaded_traces);
}
