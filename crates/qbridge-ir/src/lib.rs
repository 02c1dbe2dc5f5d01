//! qbridge Circuit and Operator Representation
//!
//! This crate holds the framework-side data that simulators consume and
//! produce: circuits, sum-of-Pauli operators and wavefunctions.
//!
//! # Core Components
//!
//! - **Circuits**: [`Circuit`] is an ordered list of [`Instruction`]s over a
//!   fixed qubit register, built through a fluent API
//! - **Gates**: [`StandardGate`] for built-in gates and [`CustomGate`] for
//!   user-supplied unitaries
//! - **Parameters**: [`ParameterExpression`] for symbolic angles
//! - **Operators**: [`PauliSum`] of [`PauliTerm`]s, the observables whose
//!   expectation values simulators report
//! - **Wavefunctions**: [`Wavefunction`] plus the boundary utilities
//!   [`flip_amplitudes`] and [`sample_from_wavefunction`]
//!
//! # Bit order
//!
//! Qubit 0 is the most significant bit of a wavefunction index, and entry 0
//! of a sampled [`Bitstring`].
//!
//! # Example: Building a Bell State
//!
//! ```rust
//! use qbridge_ir::{Circuit, QubitId};
//!
//! let mut circuit = Circuit::with_size("bell_state", 2, 0);
//! circuit.h(QubitId(0)).unwrap();
//! circuit.cx(QubitId(0), QubitId(1)).unwrap();
//!
//! assert_eq!(circuit.num_qubits(), 2);
//! assert_eq!(circuit.len(), 2);
//! ```

pub mod circuit;
pub mod error;
pub mod gate;
pub mod instruction;
pub mod operator;
pub mod parameter;
pub mod qubit;
pub mod wavefunction;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{ClassicalCondition, CustomGate, Gate, GateKind, StandardGate};
pub use instruction::{Instruction, InstructionKind};
pub use operator::{PauliOp, PauliSum, PauliTerm};
pub use parameter::ParameterExpression;
pub use qubit::{ClbitId, QubitId};
pub use wavefunction::{Bitstring, Wavefunction, flip_amplitudes, sample_from_wavefunction};
