//! This module provides the LIF parameters and the per-neuron state composing the `Network` structure.
//!
//! Units are fixed crate-wide: potentials in mV, currents in nA, resistances in MΩ,
//! times in ms. With these units, R * I is directly in mV.

use serde::{Deserialize, Serialize};

use super::error::LifError;

/// Parameters of the leaky integrate-and-fire model, shared by all neurons of a network.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LifParameters {
    /// The membrane resistance (MΩ).
    pub resistance: f64,
    /// The resting potential (mV), used to initialize the membrane potential.
    pub v_rest: f64,
    /// The reset potential (mV), to which the membrane potential is set after a spike.
    pub v_reset: f64,
    /// The firing threshold (mV).
    pub v_threshold: f64,
    /// The leak reversal potential (mV), toward which the membrane potential decays.
    pub e_leak: f64,
    /// The membrane time constant (ms).
    pub tau_m: f64,
    /// The synaptic current time constant (ms).
    pub tau_syn: f64,
    /// The refractory period (ms).
    pub tau_ref: f64,
}

impl Default for LifParameters {
    fn default() -> Self {
        LifParameters {
            resistance: 20.0,
            v_rest: 0.0,
            v_reset: 0.0,
            v_threshold: 30.0,
            e_leak: 0.0,
            tau_m: 30.0,
            tau_syn: 10.0,
            tau_ref: 4.0,
        }
    }
}

impl LifParameters {
    /// Check the parameters for validity.
    /// The function returns an error for non-finite values, non-positive time constants
    /// or a negative refractory period.
    pub fn validate(&self) -> Result<(), LifError> {
        let fields = [
            self.resistance,
            self.v_rest,
            self.v_reset,
            self.v_threshold,
            self.e_leak,
            self.tau_m,
            self.tau_syn,
            self.tau_ref,
        ];
        if fields.iter().any(|x| !x.is_finite()) {
            return Err(LifError::InvalidParameter(
                "All neuron parameters must be finite".to_string(),
            ));
        }
        if self.tau_m <= 0.0 {
            return Err(LifError::InvalidParameter(
                "The membrane time constant must be positive".to_string(),
            ));
        }
        if self.tau_syn <= 0.0 {
            return Err(LifError::InvalidParameter(
                "The synaptic time constant must be positive".to_string(),
            ));
        }
        if self.tau_ref < 0.0 {
            return Err(LifError::InvalidParameter(
                "The refractory period must be non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// Represents the mutable state of a single LIF neuron.
///
/// The membrane potential is held exactly at the reset potential while the neuron
/// is refractory; the synaptic current decays regardless of refractoriness.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct NeuronState {
    /// The membrane potential (mV).
    potential: f64,
    /// The synaptic current (nA), incremented by incoming spikes.
    syn_current: f64,
    /// The remaining refractory time (ms), zero when the neuron is not refractory.
    refractory_remaining: f64,
    /// Whether the neuron spiked during the last computed step.
    spiked: bool,
}

impl NeuronState {
    /// Create a new neuron state at rest.
    pub fn new(params: &LifParameters) -> Self {
        NeuronState {
            potential: params.v_rest,
            syn_current: 0.0,
            refractory_remaining: 0.0,
            spiked: false,
        }
    }

    /// Returns the membrane potential (mV).
    pub fn potential(&self) -> f64 {
        self.potential
    }

    /// Returns the synaptic current (nA).
    pub fn syn_current(&self) -> f64 {
        self.syn_current
    }

    /// Returns the remaining refractory time (ms).
    pub fn refractory_remaining(&self) -> f64 {
        self.refractory_remaining
    }

    /// Returns whether the neuron spiked during the last computed step.
    pub fn spiked(&self) -> bool {
        self.spiked
    }

    /// Returns whether the potential and the synaptic current are both finite.
    pub fn is_finite(&self) -> bool {
        self.potential.is_finite() && self.syn_current.is_finite()
    }

    /// Set the state back to rest: potential at v_rest, no synaptic current, not refractory.
    pub(crate) fn reset(&mut self, params: &LifParameters) {
        self.potential = params.v_rest;
        self.syn_current = 0.0;
        self.refractory_remaining = 0.0;
        self.spiked = false;
    }

    /// Receive a synaptic impulse from an incoming spike.
    pub(crate) fn receive(&mut self, weight: f64) {
        self.syn_current += weight;
    }

    /// Advance the state by one Euler step of size dt, given the injected current.
    ///
    /// A refractory neuron has its potential held at the reset potential and its
    /// remaining refractory time decremented (never below zero); no threshold check
    /// is performed. Otherwise the potential integrates the total current and a
    /// threshold crossing marks the neuron as spiked, resets the potential and
    /// starts the refractory period. The synaptic current decays in both cases.
    pub(crate) fn advance(&mut self, i_stim: f64, dt: f64, params: &LifParameters) {
        self.spiked = false;
        if self.refractory_remaining > 0.0 {
            self.potential = params.v_reset;
            self.refractory_remaining = (self.refractory_remaining - dt).max(0.0);
            self.syn_current += dt * (-self.syn_current / params.tau_syn);
            return;
        }

        let i_total = self.syn_current + i_stim;
        self.potential +=
            dt * (-(self.potential - params.e_leak) + params.resistance * i_total) / params.tau_m;
        self.syn_current += dt * (-self.syn_current / params.tau_syn);

        // A non-finite state is left untouched for the divergence check, so that an
        // overflowed potential is not silently reset by the threshold crossing.
        if self.is_finite() && self.potential >= params.v_threshold {
            self.spiked = true;
            self.potential = params.v_reset;
            self.refractory_remaining = params.tau_ref;
        }
    }
}
