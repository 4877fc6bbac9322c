//! Simulate a random LIF network driven by a step current and print the recorded
//! trace of neuron 0 as tab-separated values (time, potential, current).

use lif_net::error::LifError;
use lif_net::network::Network;
use lif_net::stimulus::StepCurrent;
use lif_net::{DEFAULT_DT, DEFAULT_DURATION};

fn main() -> Result<(), LifError> {
    // A network of 100 neurons with 30% connectivity and 5 nA synaptic weights,
    // driven by a 1.005 nA step current between 20 ms and 70 ms.
    let mut network = Network::rand(100, 0.3, 5.0, 42)?;
    let stimulus = StepCurrent::new(20.0, 70.0, 1.005);

    let traces = network.run(DEFAULT_DURATION, DEFAULT_DT, &stimulus, &[0])?;
    let trace = traces.trace(0).expect("neuron 0 is monitored");

    println!("t(ms)\tv(mV)\tI(nA)");
    for (&(t, v), &(_, i)) in trace.potential().iter().zip(trace.current()) {
        println!("{}\t{:.4}\t{:.4}", t, v, i);
    }
    Ok(())
}
