//! Module implementing the injected current waveforms driving a simulation.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

/// An injected current waveform, queried once per simulation step and broadcast
/// identically to all neurons of the network.
pub trait Stimulus {
    /// Returns the injected current (nA) at time `t` (ms).
    fn current(&self, t: f64) -> f64;
}

/// Any pure function of time can serve as a stimulus.
impl<F> Stimulus for F
where
    F: Fn(f64) -> f64,
{
    fn current(&self, t: f64) -> f64 {
        self(t)
    }
}

/// A step current: zero outside [t_start, t_end], constant amplitude within.
///
/// If `t_start > t_end`, the window is empty and the current is zero everywhere.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StepCurrent {
    /// The start of the current step (ms).
    pub t_start: f64,
    /// The end of the current step (ms), inclusive.
    pub t_end: f64,
    /// The amplitude of the current step (nA).
    pub amplitude: f64,
}

impl StepCurrent {
    /// Create a new step current with the specified parameters.
    pub fn new(t_start: f64, t_end: f64, amplitude: f64) -> Self {
        StepCurrent {
            t_start,
            t_end,
            amplitude,
        }
    }
}

impl Stimulus for StepCurrent {
    fn current(&self, t: f64) -> f64 {
        if self.t_start <= t && t <= self.t_end {
            self.amplitude
        } else {
            0.0
        }
    }
}

/// A sinusoidal current `offset + amplitude * sin(2π * frequency * t + phase)`.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SinusoidalCurrent {
    /// The amplitude of the oscillation (nA).
    pub amplitude: f64,
    /// The frequency of the oscillation (kHz, i.e., cycles per ms).
    pub frequency: f64,
    /// The phase of the oscillation (rad).
    pub phase: f64,
    /// The DC offset added to the oscillation (nA).
    pub offset: f64,
}

impl SinusoidalCurrent {
    /// Create a new sinusoidal current with the specified parameters.
    pub fn new(amplitude: f64, frequency: f64, phase: f64, offset: f64) -> Self {
        SinusoidalCurrent {
            amplitude,
            frequency,
            phase,
            offset,
        }
    }
}

impl Stimulus for SinusoidalCurrent {
    fn current(&self, t: f64) -> f64 {
        self.offset + self.amplitude * (TAU * self.frequency * t + self.phase).sin()
    }
}
