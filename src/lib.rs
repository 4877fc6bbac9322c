//! This crate provides tools for simulating networks of leaky integrate-and-fire (LIF)
//! neurons in Rust.
//!
//! Neurons follow the LIF dynamics with an exponentially decaying synaptic current,
//! integrated with a fixed-timestep Euler scheme. Spikes are propagated along a sparse
//! random connectivity, with all deliveries committed between steps so that the result
//! never depends on the neuron iteration order.
//!
//! Units are fixed crate-wide: potentials in mV, currents in nA, resistances in MΩ,
//! times in ms.
//!
//! # Creating Networks
//!
//! ## At Random
//!
//! ```rust
//! use lif_net::network::Network;
//!
//! // Create a random network of 100 neurons, where each ordered pair of distinct
//! // neurons is connected with probability 0.3 and weight 5 nA.
//! let network = Network::rand(100, 0.3, 5.0, 42).unwrap();
//!
//! assert_eq!(network.num_neurons(), 100);
//! ```
//!
//! ## From Explicit Connections
//!
//! ```rust
//! use lif_net::connection::{Connection, Connectivity};
//! use lif_net::network::Network;
//! use lif_net::neuron::LifParameters;
//!
//! let connections = vec![
//!     Connection::new(0, 1, 1.0),
//!     Connection::new(1, 2, -0.5),
//!     Connection::new(2, 0, 0.25),
//! ];
//! let connectivity = Connectivity::from_connections(3, &connections).unwrap();
//! let network = Network::new(LifParameters::default(), connectivity).unwrap();
//!
//! assert_eq!(network.connectivity().num_connections(), 3);
//! ```
//!
//! # Simulating Networks
//!
//! ```rust
//! use lif_net::network::Network;
//! use lif_net::stimulus::StepCurrent;
//! use lif_net::{DEFAULT_DT, DEFAULT_DURATION};
//!
//! let mut network = Network::rand(100, 0.3, 5.0, 42).unwrap();
//!
//! // Inject a 1 nA step current between 20 ms and 70 ms, and record the membrane
//! // potential and total current of neuron 0.
//! let stimulus = StepCurrent::new(20.0, 70.0, 1.0);
//! let traces = network
//!     .run(DEFAULT_DURATION, DEFAULT_DT, &stimulus, &[0])
//!     .unwrap();
//!
//! assert!(traces.is_complete());
//! assert_eq!(traces.trace(0).unwrap().len(), 300);
//! ```

pub mod connection;
pub mod error;
pub mod network;
pub mod neuron;
pub mod recorder;
pub mod stimulus;

/// The default simulation duration (ms).
pub const DEFAULT_DURATION: f64 = 300.0;
/// The default simulation step size (ms).
pub const DEFAULT_DT: f64 = 1.0;
