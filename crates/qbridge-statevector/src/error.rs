//! Error types for the state-vector engine.

use thiserror::Error;

/// Errors raised by the engine.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EngineError {
    /// Loaded vector does not match the state's dimension.
    #[error("State has dimension {expected}, loaded vector has {got} amplitudes")]
    DimensionMismatch {
        /// `2^num_qubits` of the state.
        expected: usize,
        /// Length of the supplied vector.
        got: usize,
    },

    /// A gate or term references a qubit the state does not have.
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit state")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Width of the state.
        num_qubits: usize,
    },

    /// Circuit width differs from the state it is applied to.
    #[error("Circuit acts on {circuit} qubits but state has {state}")]
    WidthMismatch {
        /// Width the circuit was built for.
        circuit: usize,
        /// Width of the state.
        state: usize,
    },

    /// Dense matrix gate has the wrong shape for its targets.
    #[error("Matrix of shape {rows}x{cols} cannot act on {targets} qubits")]
    MatrixShape {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
        /// Number of target qubits.
        targets: usize,
    },

    /// A gate lists the same qubit twice.
    #[error("Qubit {0} used more than once by a gate")]
    DuplicateQubit(usize),

    /// OpenFermion-style observable text could not be parsed.
    #[error("Cannot parse observable text {text:?}: {reason}")]
    ObservableParse {
        /// The offending input fragment.
        text: String,
        /// What went wrong.
        reason: String,
    },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
