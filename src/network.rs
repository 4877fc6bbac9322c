//! Module implementing the `Network` structure: the neuron state bank, the two-phase
//! integration step, and the simulation driver.

use itertools::Itertools;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::connection::Connectivity;
use super::error::LifError;
use super::neuron::{LifParameters, NeuronState};
use super::recorder::{Divergence, RecordedTraces, Recorder};
use super::stimulus::Stimulus;

/// The minimum number of neurons for parallel state updates.
pub const MIN_NEURONS_PAR: usize = 1000;

/// A network of LIF neurons: shared parameters, a fixed connectivity and the
/// per-neuron states. The caller controls the lifecycle: create, run, optionally
/// reset and run again on the same topology, discard.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Network {
    params: LifParameters,
    connectivity: Connectivity,
    states: Vec<NeuronState>,
}

impl Network {
    /// Create a new network from the specified parameters and connectivity, with
    /// all neurons at rest. The function returns an error for invalid parameters.
    pub fn new(params: LifParameters, connectivity: Connectivity) -> Result<Self, LifError> {
        params.validate()?;
        let states = (0..connectivity.num_neurons())
            .map(|_| NeuronState::new(&params))
            .collect();
        Ok(Network {
            params,
            connectivity,
            states,
        })
    }

    /// Create a random network with default LIF parameters, where each ordered pair
    /// of distinct neurons is connected with probability `p_connect` and common
    /// weight `weight`. The sampling is deterministic given the seed.
    pub fn rand(
        num_neurons: usize,
        p_connect: f64,
        weight: f64,
        seed: u64,
    ) -> Result<Self, LifError> {
        Self::rand_with_params(LifParameters::default(), num_neurons, p_connect, weight, seed)
    }

    /// Create a random network with the specified LIF parameters.
    pub fn rand_with_params(
        params: LifParameters,
        num_neurons: usize,
        p_connect: f64,
        weight: f64,
        seed: u64,
    ) -> Result<Self, LifError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let connectivity = Connectivity::rand(num_neurons, p_connect, weight, &mut rng)?;
        log::info!(
            "Random network sampled: {} neurons, {} connections",
            connectivity.num_neurons(),
            connectivity.num_connections()
        );
        Self::new(params, connectivity)
    }

    /// Returns the LIF parameters of the network.
    pub fn params(&self) -> &LifParameters {
        &self.params
    }

    /// Returns the connectivity of the network.
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Returns the number of neurons of the network.
    pub fn num_neurons(&self) -> usize {
        self.states.len()
    }

    /// Returns the state of the specified neuron, if any.
    pub fn state(&self, neuron_id: usize) -> Option<&NeuronState> {
        self.states.get(neuron_id)
    }

    /// Set all neurons back to rest without rebuilding the connectivity, so that the
    /// same topology can be simulated again from the initial conditions.
    pub fn reset(&mut self) {
        let params = &self.params;
        for state in self.states.iter_mut() {
            state.reset(params);
        }
    }

    /// Advance all neuron states by one step of size `dt`, given the injected current.
    /// Returns the number of neurons that spiked during the step.
    ///
    /// The step is two-phase. First, every neuron is advanced from its committed
    /// state, so the result does not depend on the iteration order. Second, for every
    /// neuron that spiked, each outgoing connection delivers its weight to the
    /// target's synaptic current; the increments are first integrated at the next
    /// step and are never visible to the threshold checks of the current one.
    ///
    /// The function returns an error if a neuron reached a non-finite state.
    pub fn step(&mut self, i_stim: f64, dt: f64, time: f64) -> Result<usize, LifError> {
        // Phase 1: per-neuron updates, independent of each other.
        let params = &self.params;
        if self.states.len() >= MIN_NEURONS_PAR {
            self.states
                .par_iter_mut()
                .for_each(|state| state.advance(i_stim, dt, params));
        } else {
            self.states
                .iter_mut()
                .for_each(|state| state.advance(i_stim, dt, params));
        }

        if let Some(neuron_id) = self.states.iter().position(|state| !state.is_finite()) {
            return Err(LifError::SimulationDiverged { neuron_id, time });
        }

        // Phase 2: deliver the outgoing impulses of all spiking neurons.
        let spiking = self
            .states
            .iter()
            .positions(|state| state.spiked())
            .collect::<Vec<usize>>();
        for &source_id in &spiking {
            for &(target_id, weight) in self.connectivity.outgoing(source_id) {
                self.states[target_id].receive(weight);
            }
        }
        Ok(spiking.len())
    }

    /// Run the simulation for the specified duration and step size, recording the
    /// potential and total current of the monitored neurons at every step.
    ///
    /// The state is sampled at each step time before the update, so the first sample
    /// holds the initial conditions. If the simulation diverges, the run stops and
    /// the traces recorded so far are returned together with a divergence indicator.
    /// Duplicate monitor IDs are recorded once; an empty monitor list yields empty
    /// traces. The function returns an error for a non-positive duration or step
    /// size, or for a monitor ID exceeding the number of neurons.
    pub fn run<S: Stimulus>(
        &mut self,
        duration: f64,
        dt: f64,
        stimulus: &S,
        monitor_ids: &[usize],
    ) -> Result<RecordedTraces, LifError> {
        if !(duration > 0.0 && duration.is_finite()) {
            return Err(LifError::InvalidParameter(
                "The simulation duration must be positive and finite".to_string(),
            ));
        }
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(LifError::InvalidParameter(
                "The simulation step size must be positive and finite".to_string(),
            ));
        }
        let monitor_ids = monitor_ids.iter().copied().unique().collect::<Vec<usize>>();
        if let Some(&neuron_id) = monitor_ids.iter().find(|&&id| id >= self.num_neurons()) {
            return Err(LifError::OutOfBounds(format!(
                "Monitored neuron {} exceeds the number of neurons {}",
                neuron_id,
                self.num_neurons()
            )));
        }

        let num_steps = (duration / dt).round() as usize;
        log::info!(
            "Starting simulation: {} neurons, {} steps of {} ms",
            self.num_neurons(),
            num_steps,
            dt
        );

        let mut recorder = Recorder::new(&monitor_ids);
        let mut num_spikes = 0;
        for step in 0..num_steps {
            let time = step as f64 * dt;
            let i_stim = stimulus.current(time);
            recorder.record(time, &self.states, i_stim);

            match self.step(i_stim, dt, time) {
                Ok(step_spikes) => num_spikes += step_spikes,
                Err(LifError::SimulationDiverged { neuron_id, time }) => {
                    log::debug!(
                        "Simulation aborted: neuron {} diverged at step {} ({} ms)",
                        neuron_id,
                        step,
                        time
                    );
                    return Ok(recorder.finish(Some(Divergence {
                        step,
                        neuron_id,
                        time,
                    })));
                }
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "Simulation done: {} steps, {} spikes in total",
            num_steps,
            num_spikes
        );
        Ok(recorder.finish(None))
    }

    /// Save the network to a JSON file.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<(), LifError> {
        let file = File::create(path).map_err(|e| LifError::IOError(e.to_string()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self)
            .map_err(|e| LifError::IOError(e.to_string()))?;
        writer.flush().map_err(|e| LifError::IOError(e.to_string()))
    }

    /// Load a network from a JSON file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Network, LifError> {
        let file = File::open(path).map_err(|e| LifError::IOError(e.to_string()))?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader).map_err(|e| LifError::IOError(e.to_string()))
    }
}
