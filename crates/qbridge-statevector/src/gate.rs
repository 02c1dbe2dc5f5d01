//! Native gate set.

use ndarray::Array2;
use num_complex::Complex64;
use std::collections::BTreeSet;

use crate::error::{EngineError, EngineResult};
use crate::observable::Pauli;
use crate::state::{Matrix2, PauliMasks, QuantumState};

/// A gate the engine can apply directly.
///
/// Rotations are `exp(-iθσ/2)`; qubit indices are engine indices.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeGate {
    /// Identity.
    Identity(usize),
    /// Pauli-X.
    X(usize),
    /// Pauli-Y.
    Y(usize),
    /// Pauli-Z.
    Z(usize),
    /// Hadamard.
    H(usize),
    /// S = diag(1, i).
    S(usize),
    /// S†.
    Sdag(usize),
    /// T = diag(1, e^{iπ/4}).
    T(usize),
    /// T†.
    Tdag(usize),
    /// √X.
    SqrtX(usize),
    /// √X†.
    SqrtXdag(usize),
    /// X rotation.
    RX(usize, f64),
    /// Y rotation.
    RY(usize, f64),
    /// Z rotation.
    RZ(usize, f64),
    /// diag(1, e^{iθ}).
    Phase(usize, f64),
    /// Generic single-qubit rotation U3(θ, φ, λ).
    U3 {
        /// Target qubit.
        target: usize,
        /// θ.
        theta: f64,
        /// φ.
        phi: f64,
        /// λ.
        lambda: f64,
    },
    /// Controlled-NOT.
    CNOT {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
    },
    /// Controlled-Z.
    CZ {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
    },
    /// SWAP.
    Swap(usize, usize),
    /// iSWAP.
    ISwap(usize, usize),
    /// Doubly-controlled NOT.
    Toffoli {
        /// Control qubits.
        controls: [usize; 2],
        /// Target qubit.
        target: usize,
    },
    /// Controlled SWAP.
    Fredkin {
        /// Control qubit.
        control: usize,
        /// Swapped qubits.
        targets: [usize; 2],
    },
    /// Single-qubit matrix applied when `control` is |1⟩.
    Controlled {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
        /// Matrix applied to the target.
        matrix: Matrix2,
    },
    /// `exp(-iθ/2 · P)` for a multi-qubit Pauli string.
    PauliRotation {
        /// Qubits the string acts on.
        targets: Vec<usize>,
        /// Pauli letter for each target.
        paulis: Vec<Pauli>,
        /// Rotation angle θ.
        angle: f64,
    },
    /// Arbitrary unitary; bit `k` of the matrix index is `targets[k]`.
    DenseMatrix {
        /// Target qubits, least significant first.
        targets: Vec<usize>,
        /// `2^k × 2^k` matrix.
        matrix: Array2<Complex64>,
    },
}

impl NativeGate {
    /// Short engine name of the gate.
    pub fn name(&self) -> &'static str {
        match self {
            NativeGate::Identity(_) => "I",
            NativeGate::X(_) => "X",
            NativeGate::Y(_) => "Y",
            NativeGate::Z(_) => "Z",
            NativeGate::H(_) => "H",
            NativeGate::S(_) => "S",
            NativeGate::Sdag(_) => "Sdag",
            NativeGate::T(_) => "T",
            NativeGate::Tdag(_) => "Tdag",
            NativeGate::SqrtX(_) => "sqrtX",
            NativeGate::SqrtXdag(_) => "sqrtXdag",
            NativeGate::RX(..) => "RX",
            NativeGate::RY(..) => "RY",
            NativeGate::RZ(..) => "RZ",
            NativeGate::Phase(..) => "Phase",
            NativeGate::U3 { .. } => "U3",
            NativeGate::CNOT { .. } => "CNOT",
            NativeGate::CZ { .. } => "CZ",
            NativeGate::Swap(..) => "SWAP",
            NativeGate::ISwap(..) => "ISWAP",
            NativeGate::Toffoli { .. } => "Toffoli",
            NativeGate::Fredkin { .. } => "Fredkin",
            NativeGate::Controlled { .. } => "Controlled",
            NativeGate::PauliRotation { .. } => "PauliRotation",
            NativeGate::DenseMatrix { .. } => "DenseMatrix",
        }
    }

    /// Every qubit the gate touches.
    pub fn qubits(&self) -> Vec<usize> {
        match self {
            NativeGate::Identity(q)
            | NativeGate::X(q)
            | NativeGate::Y(q)
            | NativeGate::Z(q)
            | NativeGate::H(q)
            | NativeGate::S(q)
            | NativeGate::Sdag(q)
            | NativeGate::T(q)
            | NativeGate::Tdag(q)
            | NativeGate::SqrtX(q)
            | NativeGate::SqrtXdag(q)
            | NativeGate::RX(q, _)
            | NativeGate::RY(q, _)
            | NativeGate::RZ(q, _)
            | NativeGate::Phase(q, _)
            | NativeGate::U3 { target: q, .. } => vec![*q],
            NativeGate::CNOT { control, target }
            | NativeGate::CZ { control, target }
            | NativeGate::Controlled {
                control, target, ..
            } => vec![*control, *target],
            NativeGate::Swap(a, b) | NativeGate::ISwap(a, b) => vec![*a, *b],
            NativeGate::Toffoli { controls, target } => vec![controls[0], controls[1], *target],
            NativeGate::Fredkin { control, targets } => vec![*control, targets[0], targets[1]],
            NativeGate::PauliRotation { targets, .. } | NativeGate::DenseMatrix { targets, .. } => {
                targets.clone()
            }
        }
    }

    fn validate(&self, state: &QuantumState) -> EngineResult<()> {
        let qubits = self.qubits();
        let mut seen = BTreeSet::new();
        for &q in &qubits {
            state.check_qubit(q)?;
            if !seen.insert(q) {
                return Err(EngineError::DuplicateQubit(q));
            }
        }

        match self {
            NativeGate::DenseMatrix { targets, matrix } => {
                let dim = 1usize << targets.len();
                let (rows, cols) = matrix.dim();
                if rows != dim || cols != dim {
                    return Err(EngineError::MatrixShape {
                        rows,
                        cols,
                        targets: targets.len(),
                    });
                }
            }
            NativeGate::PauliRotation { targets, paulis, .. } if targets.len() != paulis.len() => {
                return Err(EngineError::MatrixShape {
                    rows: paulis.len(),
                    cols: 1,
                    targets: targets.len(),
                });
            }
            _ => {}
        }
        Ok(())
    }

    /// Apply the gate to `state` in place.
    pub fn update_quantum_state(&self, state: &mut QuantumState) -> EngineResult<()> {
        self.validate(state)?;

        match self {
            NativeGate::Identity(_) => {}
            NativeGate::X(q) => state.apply_x(*q),
            NativeGate::Y(q) => state.apply_y(*q),
            NativeGate::Z(q) => state.apply_z(*q),
            NativeGate::H(q) => state.apply_h(*q),
            NativeGate::S(q) => state.apply_phase(*q, std::f64::consts::FRAC_PI_2),
            NativeGate::Sdag(q) => state.apply_phase(*q, -std::f64::consts::FRAC_PI_2),
            NativeGate::T(q) => state.apply_phase(*q, std::f64::consts::FRAC_PI_4),
            NativeGate::Tdag(q) => state.apply_phase(*q, -std::f64::consts::FRAC_PI_4),
            NativeGate::SqrtX(q) => state.apply_matrix2(*q, 0, &sqrt_x(false)),
            NativeGate::SqrtXdag(q) => state.apply_matrix2(*q, 0, &sqrt_x(true)),
            NativeGate::RX(q, theta) => state.apply_matrix2(*q, 0, &rx(*theta)),
            NativeGate::RY(q, theta) => state.apply_matrix2(*q, 0, &ry(*theta)),
            NativeGate::RZ(q, theta) => state.apply_rz(*q, *theta),
            NativeGate::Phase(q, theta) => state.apply_phase(*q, *theta),
            NativeGate::U3 {
                target,
                theta,
                phi,
                lambda,
            } => state.apply_matrix2(*target, 0, &u3(*theta, *phi, *lambda)),
            NativeGate::CNOT { control, target } => state.apply_cx(*control, *target),
            NativeGate::CZ { control, target } => state.apply_cz(*control, *target),
            NativeGate::Swap(a, b) => state.apply_swap(*a, *b),
            NativeGate::ISwap(a, b) => state.apply_iswap(*a, *b),
            NativeGate::Toffoli { controls, target } => {
                state.apply_ccx(controls[0], controls[1], *target);
            }
            NativeGate::Fredkin { control, targets } => {
                state.apply_cswap(*control, targets[0], targets[1]);
            }
            NativeGate::Controlled {
                control,
                target,
                matrix,
            } => state.apply_matrix2(*target, 1usize << *control, matrix),
            NativeGate::PauliRotation {
                targets,
                paulis,
                angle,
            } => {
                let masks = pauli_masks(targets, paulis);
                state.apply_pauli_rotation(&masks, *angle);
            }
            NativeGate::DenseMatrix { targets, matrix } => state.apply_dense(targets, matrix),
        }
        Ok(())
    }
}

pub(crate) fn pauli_masks(targets: &[usize], paulis: &[Pauli]) -> PauliMasks {
    let mut masks = PauliMasks::default();
    for (&q, pauli) in targets.iter().zip(paulis) {
        let bit = 1 << q;
        match pauli {
            Pauli::X => masks.x_mask |= bit,
            Pauli::Z => masks.z_mask |= bit,
            Pauli::Y => {
                masks.x_mask |= bit;
                masks.z_mask |= bit;
                masks.num_y += 1;
            }
        }
    }
    masks
}

// =============================================================================
// Single-qubit matrices
// =============================================================================

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

/// Pauli-Y.
pub fn pauli_y() -> Matrix2 {
    [[c(0.0, 0.0), c(0.0, -1.0)], [c(0.0, 1.0), c(0.0, 0.0)]]
}

/// Hadamard.
pub fn hadamard() -> Matrix2 {
    let h = std::f64::consts::FRAC_1_SQRT_2;
    [[c(h, 0.0), c(h, 0.0)], [c(h, 0.0), c(-h, 0.0)]]
}

/// diag(1, e^{iθ}).
pub fn phase(theta: f64) -> Matrix2 {
    [
        [c(1.0, 0.0), c(0.0, 0.0)],
        [c(0.0, 0.0), Complex64::from_polar(1.0, theta)],
    ]
}

/// `exp(-iθX/2)`.
pub fn rx(theta: f64) -> Matrix2 {
    let (s, co) = (theta / 2.0).sin_cos();
    [[c(co, 0.0), c(0.0, -s)], [c(0.0, -s), c(co, 0.0)]]
}

/// `exp(-iθY/2)`.
pub fn ry(theta: f64) -> Matrix2 {
    let (s, co) = (theta / 2.0).sin_cos();
    [[c(co, 0.0), c(-s, 0.0)], [c(s, 0.0), c(co, 0.0)]]
}

/// `exp(-iθZ/2)`.
pub fn rz(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), c(0.0, 0.0)],
        [c(0.0, 0.0), Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

/// U3(θ, φ, λ).
pub fn u3(theta: f64, phi: f64, lambda: f64) -> Matrix2 {
    let (s, co) = (theta / 2.0).sin_cos();
    [
        [c(co, 0.0), -Complex64::from_polar(s, lambda)],
        [
            Complex64::from_polar(s, phi),
            Complex64::from_polar(co, phi + lambda),
        ],
    ]
}

fn sqrt_x(dagger: bool) -> Matrix2 {
    let (p, m) = (c(0.5, 0.5), c(0.5, -0.5));
    if dagger {
        [[m, p], [p, m]]
    } else {
        [[p, m], [m, p]]
    }
}
