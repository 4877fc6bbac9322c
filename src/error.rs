//! Error module for the LIF network library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq, Clone)]
pub enum LifError {
    /// Error for invalid parameters, e.g., a connection probability outside [0, 1].
    InvalidParameter(String),
    /// Error for out of bounds access, e.g., neuron not found.
    OutOfBounds(String),
    /// Error for a diverged simulation, i.e., a non-finite potential or synaptic current.
    SimulationDiverged { neuron_id: usize, time: f64 },
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for LifError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LifError::InvalidParameter(e) => write!(f, "Invalid parameter: {}", e),
            LifError::OutOfBounds(e) => write!(f, "Index out of bounds: {}", e),
            LifError::SimulationDiverged { neuron_id, time } => write!(
                f,
                "Simulation diverged: neuron {} has a non-finite state at time {} ms",
                neuron_id, time
            ),
            LifError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for LifError {}
