//! Circuit instructions.

use serde::{Deserialize, Serialize};

use crate::gate::Gate;
use crate::qubit::{ClbitId, QubitId};

/// What an instruction does to its operands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InstructionKind {
    /// Unitary evolution.
    Gate(Gate),
    /// Projective measurement into a classical bit.
    Measure,
    /// Return the qubit to |0⟩.
    Reset,
    /// Scheduling fence; no effect on the state.
    Barrier,
    /// Idle for `duration` device time units.
    Delay { duration: u64 },
}

impl InstructionKind {
    pub fn name(&self) -> &str {
        match self {
            InstructionKind::Gate(g) => g.name(),
            InstructionKind::Measure => "measure",
            InstructionKind::Reset => "reset",
            InstructionKind::Barrier => "barrier",
            InstructionKind::Delay { .. } => "delay",
        }
    }
}

/// One step of a circuit: an [`InstructionKind`] and the bits it touches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub qubits: Vec<QubitId>,
    /// Only measurements write classical bits.
    pub clbits: Vec<ClbitId>,
}

impl Instruction {
    fn on(kind: InstructionKind, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self {
            kind,
            qubits: qubits.into_iter().collect(),
            clbits: Vec::new(),
        }
    }

    pub fn gate(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on(InstructionKind::Gate(gate.into()), qubits)
    }

    pub fn measure(qubit: QubitId, clbit: ClbitId) -> Self {
        Self {
            clbits: vec![clbit],
            ..Self::on(InstructionKind::Measure, [qubit])
        }
    }

    pub fn reset(qubit: QubitId) -> Self {
        Self::on(InstructionKind::Reset, [qubit])
    }

    pub fn barrier(qubits: impl IntoIterator<Item = QubitId>) -> Self {
        Self::on(InstructionKind::Barrier, qubits)
    }

    pub fn delay(qubit: QubitId, duration: u64) -> Self {
        Self::on(InstructionKind::Delay { duration }, [qubit])
    }

    pub fn is_gate(&self) -> bool {
        matches!(self.kind, InstructionKind::Gate(_))
    }

    pub fn is_measure(&self) -> bool {
        matches!(self.kind, InstructionKind::Measure)
    }

    pub fn as_gate(&self) -> Option<&Gate> {
        match &self.kind {
            InstructionKind::Gate(g) => Some(g),
            _ => None,
        }
    }

    /// Gate name, or the lower-case name of a non-gate instruction.
    pub fn name(&self) -> &str {
        self.kind.name()
    }
}
