//! Error types for circuits, operators and wavefunctions.

use thiserror::Error;

use crate::qubit::{ClbitId, QubitId};

/// Errors raised while building or evaluating framework-side data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// An operand lies outside the circuit's qubit register.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit{}", on(.operation))]
    QubitOutOfRange {
        qubit: QubitId,
        num_qubits: u32,
        /// Instruction or term being built, when known.
        operation: Option<String>,
    },

    /// A measurement targets a classical bit the circuit does not have.
    #[error("Classical bit {clbit} out of range for {num_clbits} classical bits")]
    ClbitOutOfRange { clbit: ClbitId, num_clbits: u32 },

    /// An instruction lists the wrong number of qubits for its gate.
    #[error("'{operation}' acts on {expected} qubits, got {got}")]
    ArityMismatch {
        operation: String,
        expected: u32,
        got: u32,
    },

    /// A symbolic parameter was evaluated without a value.
    #[error("Parameter '{0}' has no value")]
    UnboundParameter(String),

    /// The same qubit appears twice in one instruction or Pauli term.
    #[error("Qubit {qubit} appears more than once{}", on(.operation))]
    DuplicateQubit {
        qubit: QubitId,
        operation: Option<String>,
    },

    /// Amplitude vector cannot describe a quantum state.
    #[error("Invalid wavefunction: {0}")]
    InvalidWavefunction(String),
}

#[allow(clippy::ref_option)]
fn on(operation: &Option<String>) -> String {
    operation
        .as_deref()
        .map(|name| format!(" in '{name}'"))
        .unwrap_or_default()
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
