//! Error types for the state-vector adapter.

use qbridge_hal::HalError;
use qbridge_ir::IrError;
use qbridge_statevector::EngineError;
use thiserror::Error;

pub type AdapterResult<T> = Result<T, AdapterError>;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AdapterError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Ir(#[from] IrError),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Circuit has {num_qubits} qubits, simulator supports at most {max_qubits}")]
    TooManyQubits { num_qubits: usize, max_qubits: u32 },
}

impl From<AdapterError> for HalError {
    fn from(e: AdapterError) -> Self {
        match e {
            AdapterError::Ir(err) => HalError::Ir(err),
            AdapterError::UnsupportedOperation(msg) => HalError::Unsupported(msg),
            AdapterError::TooManyQubits { .. } => HalError::CircuitTooLarge(e.to_string()),
            other => HalError::Backend(other.to_string()),
        }
    }
}
