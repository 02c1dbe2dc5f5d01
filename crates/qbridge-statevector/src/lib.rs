//! qbridge State-Vector Engine
//!
//! A dense state-vector simulator with its own conventions, driven by the
//! qbridge adapters.
//!
//! # Conventions
//!
//! - Qubit `q` is bit `1 << q` of an amplitude index (little-endian)
//! - Rotation gates are `exp(-iθσ/2)`
//! - Observables are imported from OpenFermion-style text, see
//!   [`Observable::from_openfermion_text`]
//!
//! # Example
//!
//! ```rust
//! use qbridge_statevector::{NativeCircuit, NativeGate, Observable, QuantumState};
//!
//! let mut circuit = NativeCircuit::new(2);
//! circuit.add_gate(NativeGate::H(0));
//! circuit.add_gate(NativeGate::CNOT { control: 0, target: 1 });
//!
//! let mut state = QuantumState::new(2);
//! circuit.update_quantum_state(&mut state).unwrap();
//!
//! let zz = Observable::from_openfermion_text("1.0 [Z0 Z1]").unwrap();
//! let value = zz.expectation_value(&state).unwrap();
//! assert!((value.re - 1.0).abs() < 1e-12);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod observable;
mod state;

pub use circuit::NativeCircuit;
pub use error::{EngineError, EngineResult};
pub use gate::NativeGate;
pub use observable::{Observable, Pauli, PauliOperator};
pub use state::{Matrix2, QuantumState};
