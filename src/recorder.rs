//! Module implementing the recording of state traces during a simulation.

use serde::{Deserialize, Serialize};

use super::neuron::NeuronState;

/// Indicates that a run was aborted because a neuron reached a non-finite state.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Divergence {
    /// The step at which the divergence was detected.
    pub step: usize,
    /// The ID of the first neuron found with a non-finite state.
    pub neuron_id: usize,
    /// The simulation time (ms) of the diverged step.
    pub time: f64,
}

/// The recorded time series of a single monitored neuron.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Trace {
    neuron_id: usize,
    potential: Vec<(f64, f64)>,
    current: Vec<(f64, f64)>,
}

impl Trace {
    fn new(neuron_id: usize) -> Self {
        Trace {
            neuron_id,
            potential: Vec::new(),
            current: Vec::new(),
        }
    }

    /// Returns the ID of the monitored neuron.
    pub fn neuron_id(&self) -> usize {
        self.neuron_id
    }

    /// Returns the recorded (time, potential) samples, in mV.
    pub fn potential(&self) -> &[(f64, f64)] {
        &self.potential[..]
    }

    /// Returns the recorded (time, current) samples, in nA.
    /// The recorded current is the total input current, i.e., the synaptic current
    /// plus the injected stimulus current.
    pub fn current(&self) -> &[(f64, f64)] {
        &self.current[..]
    }

    /// Returns the number of recorded samples.
    pub fn len(&self) -> usize {
        self.potential.len()
    }

    /// Returns whether the trace is empty.
    pub fn is_empty(&self) -> bool {
        self.potential.is_empty()
    }
}

/// The traces recorded during one simulation run, read-only once the run completed.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RecordedTraces {
    traces: Vec<Trace>,
    divergence: Option<Divergence>,
}

impl RecordedTraces {
    /// Returns the traces of all monitored neurons.
    pub fn traces(&self) -> &[Trace] {
        &self.traces[..]
    }

    /// Returns the trace of the specified neuron, if monitored.
    pub fn trace(&self, neuron_id: usize) -> Option<&Trace> {
        self.traces
            .iter()
            .find(|trace| trace.neuron_id() == neuron_id)
    }

    /// Returns the divergence indicator, if the run was aborted.
    pub fn divergence(&self) -> Option<&Divergence> {
        self.divergence.as_ref()
    }

    /// Returns whether the run completed without divergence.
    pub fn is_complete(&self) -> bool {
        self.divergence.is_none()
    }
}

/// Append-only recorder driving the trace collection, owned by the simulation loop.
pub(crate) struct Recorder {
    traces: Vec<Trace>,
}

impl Recorder {
    /// Create a recorder for the specified monitored neurons.
    pub(crate) fn new(monitor_ids: &[usize]) -> Self {
        Recorder {
            traces: monitor_ids.iter().map(|&id| Trace::new(id)).collect(),
        }
    }

    /// Append one sample per monitored neuron at the given time.
    pub(crate) fn record(&mut self, t: f64, states: &[NeuronState], i_stim: f64) {
        for trace in self.traces.iter_mut() {
            let state = &states[trace.neuron_id];
            trace.potential.push((t, state.potential()));
            trace.current.push((t, state.syn_current() + i_stim));
        }
    }

    /// Seal the recording into read-only traces.
    pub(crate) fn finish(self, divergence: Option<Divergence>) -> RecordedTraces {
        RecordedTraces {
            traces: self.traces,
            divergence,
        }
    }
}
