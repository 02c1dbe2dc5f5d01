//! qbridge State-Vector Adapter
//!
//! This crate lets the framework drive the `qbridge-statevector` engine. It
//! translates circuits gate by gate, translates Pauli-sum operators through
//! the engine's OpenFermion-style text importer (memoized per operator),
//! and keeps the two sides' bit orders apart.
//!
//! # Features
//!
//! - **Exact expectation values**: one real value per operator term
//! - **Measurement sampling**: Born-rule bitstrings, reproducible with a seed
//! - **Wavefunctions**: final states in framework bit order
//! - **Shared term cache**: one [`TermCache`] can serve many simulators
//!
//! # Example
//!
//! ```rust
//! use qbridge_adapter_sv::StatevectorSimulator;
//! use qbridge_hal::QuantumSimulator;
//! use qbridge_ir::{Circuit, PauliOp, PauliSum, PauliTerm};
//!
//! let simulator = StatevectorSimulator::new().with_seed(7);
//! let circuit = Circuit::bell().unwrap();
//!
//! let zz = PauliTerm::new(1.0, [(0, PauliOp::Z), (1, PauliOp::Z)]).unwrap();
//! let values = simulator
//!     .get_exact_expectation_values(&circuit, &PauliSum::from(zz))
//!     .unwrap();
//! assert!((values.values()[0] - 1.0).abs() < 1e-12);
//!
//! let shots = simulator.run_circuit_and_measure(&circuit, 100).unwrap();
//! assert!(shots.bitstrings().iter().all(|b| b[0] == b[1]));
//! ```

pub mod conversions;
pub mod error;
pub mod simulator;
pub mod terms;

pub use error::{AdapterError, AdapterResult};
pub use simulator::StatevectorSimulator;
pub use terms::{ObservableImporter, OpenFermionImporter, TermCache};
