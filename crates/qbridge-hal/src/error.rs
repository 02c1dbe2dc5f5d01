//! Error types for the HAL crate.

use qbridge_ir::IrError;
use thiserror::Error;

/// Errors that can occur in simulator operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HalError {
    /// Invalid circuit.
    #[error("Invalid circuit: {0}")]
    InvalidCircuit(String),

    /// Circuit exceeds simulator capabilities.
    #[error("Circuit exceeds simulator capabilities: {0}")]
    CircuitTooLarge(String),

    /// Unsupported feature.
    #[error("Unsupported feature: {0}")]
    Unsupported(String),

    /// Invalid number of shots.
    #[error("Invalid shots: {0}")]
    InvalidShots(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error from the circuit or operator representation.
    #[error(transparent)]
    Ir(#[from] IrError),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic backend error.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for HAL operations.
pub type HalResult<T> = Result<T, HalError>;
