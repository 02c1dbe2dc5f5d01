//! Native circuits: ordered gate lists applied to a [`QuantumState`].

use tracing::trace;

use crate::error::{EngineError, EngineResult};
use crate::gate::NativeGate;
use crate::state::QuantumState;

/// A gate sequence built for a fixed number of qubits.
#[derive(Debug, Clone, PartialEq)]
pub struct NativeCircuit {
    num_qubits: usize,
    gates: Vec<NativeGate>,
}

impl NativeCircuit {
    /// Create an empty circuit over `num_qubits` qubits.
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Append a gate. Qubit ranges are checked when the circuit runs.
    pub fn add_gate(&mut self, gate: NativeGate) {
        self.gates.push(gate);
    }

    pub fn gates(&self) -> &[NativeGate] {
        &self.gates
    }

    pub fn gate_count(&self) -> usize {
        self.gates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Apply every gate, in order, to `state`.
    ///
    /// The state must have exactly the circuit's width. On error the state
    /// is left with the gates before the failing one applied.
    pub fn update_quantum_state(&self, state: &mut QuantumState) -> EngineResult<()> {
        if state.num_qubits() != self.num_qubits {
            return Err(EngineError::WidthMismatch {
                circuit: self.num_qubits,
                state: state.num_qubits(),
            });
        }

        for gate in &self.gates {
            trace!(gate = gate.name(), qubits = ?gate.qubits(), "applying gate");
            gate.update_quantum_state(state)?;
        }
        Ok(())
    }
}
