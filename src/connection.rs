//! Module implementing the connections and the random sparse connectivity of a network.

use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::error::LifError;

/// Represents a directed connection between two neurons in a network.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Connection {
    /// The ID of the source neuron.
    source_id: usize,
    /// The ID of the target neuron.
    target_id: usize,
    /// The connection weight (nA), delivered to the target's synaptic current on each spike.
    weight: f64,
}

impl Connection {
    /// Create a new connection with the specified parameters.
    pub fn new(source_id: usize, target_id: usize, weight: f64) -> Self {
        Connection {
            source_id,
            target_id,
            weight,
        }
    }

    /// Returns the ID of the source neuron.
    pub fn source_id(&self) -> usize {
        self.source_id
    }

    /// Returns the ID of the target neuron.
    pub fn target_id(&self) -> usize {
        self.target_id
    }

    /// Returns the weight of the connection.
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// Sparse directed connectivity of a network, as a mapping from each source neuron
/// to its ordered (target, weight) pairs. Built once, immutable during simulation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Connectivity {
    num_neurons: usize,
    targets: Vec<Vec<(usize, f64)>>,
}

impl Connectivity {
    /// Create a connectivity without any connection.
    pub fn empty(num_neurons: usize) -> Result<Self, LifError> {
        if num_neurons == 0 {
            return Err(LifError::InvalidParameter(
                "The number of neurons must be positive".to_string(),
            ));
        }
        Ok(Connectivity {
            num_neurons,
            targets: vec![Vec::new(); num_neurons],
        })
    }

    /// Create a connectivity from an explicit list of connections.
    /// The function returns an error if a connection endpoint is out of bounds.
    pub fn from_connections(
        num_neurons: usize,
        connections: &[Connection],
    ) -> Result<Self, LifError> {
        let mut connectivity = Self::empty(num_neurons)?;
        for connection in connections {
            if connection.source_id() >= num_neurons || connection.target_id() >= num_neurons {
                return Err(LifError::OutOfBounds(format!(
                    "Connection ({} -> {}) exceeds the number of neurons {}",
                    connection.source_id(),
                    connection.target_id(),
                    num_neurons
                )));
            }
            connectivity.targets[connection.source_id()]
                .push((connection.target_id(), connection.weight()));
        }
        Ok(connectivity)
    }

    /// Create a random connectivity where each ordered pair of distinct neurons is
    /// independently connected with probability `p`, with a common weight.
    ///
    /// Self-connections are excluded: with `p = 1`, the connectivity has exactly
    /// `num_neurons * (num_neurons - 1)` connections.
    /// The function returns an error if `p` is outside [0, 1].
    pub fn rand<R: Rng>(
        num_neurons: usize,
        p: f64,
        weight: f64,
        rng: &mut R,
    ) -> Result<Self, LifError> {
        if !(0.0..=1.0).contains(&p) {
            return Err(LifError::InvalidParameter(format!(
                "The connection probability must be in [0, 1], got {}",
                p
            )));
        }

        let mut connectivity = Self::empty(num_neurons)?;
        for source_id in 0..num_neurons {
            for target_id in (0..num_neurons).filter(|&target_id| target_id != source_id) {
                if rng.gen_bool(p) {
                    connectivity.targets[source_id].push((target_id, weight));
                }
            }
        }
        Ok(connectivity)
    }

    /// Returns the number of neurons of the connectivity.
    pub fn num_neurons(&self) -> usize {
        self.num_neurons
    }

    /// Returns the total number of connections.
    pub fn num_connections(&self) -> usize {
        self.targets.iter().map(|targets| targets.len()).sum()
    }

    /// Returns the (target, weight) pairs of the connections leaving the specified neuron.
    pub fn outgoing(&self, source_id: usize) -> &[(usize, f64)] {
        &self.targets[source_id]
    }

    /// Returns all connections of the connectivity, sorted by source and target.
    pub fn connections(&self) -> Vec<Connection> {
        self.targets
            .iter()
            .enumerate()
            .flat_map(|(source_id, targets)| {
                targets
                    .iter()
                    .map(move |&(target_id, weight)| Connection::new(source_id, target_id, weight))
            })
            .sorted_by_key(|connection| (connection.source_id(), connection.target_id()))
            .collect()
    }
}
