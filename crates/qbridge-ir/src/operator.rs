//! Sum-of-Pauli operators.
//!
//! An operator is an ordered sum of weighted Pauli strings:
//!
//!   O = Σ_k  c_k · P_k
//!
//! where each P_k is a tensor product of single-qubit Pauli operators and
//! c_k ∈ ℂ. Term order is significant: simulators report one expectation
//! value per term, in the order the terms were given.
//!
//! # Example
//!
//! ```rust
//! use qbridge_ir::operator::{PauliOp, PauliSum, PauliTerm};
//!
//! // O = 2.0·Z₀Z₁ + 0.5·X₀
//! let op = PauliSum::from_terms(vec![
//!     PauliTerm::new(2.0, [(0, PauliOp::Z), (1, PauliOp::Z)]).unwrap(),
//!     PauliTerm::x(0, 0.5),
//! ]);
//! assert_eq!(op.n_terms(), 2);
//! assert_eq!(op.min_qubits(), 2);
//! ```

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};
use crate::qubit::QubitId;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PauliOp {
    /// Identity, dropped when a term is built.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl PauliOp {
    /// The letter used in textual Pauli notation.
    pub fn letter(self) -> char {
        match self {
            PauliOp::I => 'I',
            PauliOp::X => 'X',
            PauliOp::Y => 'Y',
            PauliOp::Z => 'Z',
        }
    }
}

impl fmt::Display for PauliOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// A single weighted Pauli term: `coefficient · P`.
///
/// Operations are stored sorted by qubit index with identities omitted;
/// qubits not listed are implicitly I.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliTerm {
    coefficient: Complex64,
    operations: Vec<(u32, PauliOp)>,
}

impl PauliTerm {
    /// Build a term from a coefficient and (qubit, op) pairs.
    ///
    /// Fails if a qubit appears more than once.
    pub fn new(
        coefficient: impl Into<Complex64>,
        ops: impl IntoIterator<Item = (u32, PauliOp)>,
    ) -> IrResult<Self> {
        let mut operations: Vec<(u32, PauliOp)> = ops
            .into_iter()
            .filter(|(_, op)| *op != PauliOp::I)
            .collect();
        operations.sort_by_key(|(q, _)| *q);

        if let Some(w) = operations.windows(2).find(|w| w[0].0 == w[1].0) {
            return Err(IrError::DuplicateQubit {
                qubit: QubitId(w[0].0),
                operation: None,
            });
        }

        Ok(Self {
            coefficient: coefficient.into(),
            operations,
        })
    }

    /// A term with no Pauli operators (a multiple of the identity).
    pub fn identity(coefficient: impl Into<Complex64>) -> Self {
        Self {
            coefficient: coefficient.into(),
            operations: vec![],
        }
    }

    /// Shorthand: single-qubit X term.
    pub fn x(qubit: u32, coefficient: f64) -> Self {
        Self::single(qubit, PauliOp::X, coefficient)
    }

    /// Shorthand: single-qubit Y term.
    pub fn y(qubit: u32, coefficient: f64) -> Self {
        Self::single(qubit, PauliOp::Y, coefficient)
    }

    /// Shorthand: single-qubit Z term.
    pub fn z(qubit: u32, coefficient: f64) -> Self {
        Self::single(qubit, PauliOp::Z, coefficient)
    }

    fn single(qubit: u32, op: PauliOp, coefficient: f64) -> Self {
        Self {
            coefficient: Complex64::new(coefficient, 0.0),
            operations: if op == PauliOp::I {
                vec![]
            } else {
                vec![(qubit, op)]
            },
        }
    }

    /// The term's coefficient.
    pub fn coefficient(&self) -> Complex64 {
        self.coefficient
    }

    /// Non-identity (qubit, op) pairs, sorted by qubit index.
    pub fn operations(&self) -> &[(u32, PauliOp)] {
        &self.operations
    }

    /// True if there are no non-identity operators.
    pub fn is_identity(&self) -> bool {
        self.operations.is_empty()
    }

    /// The highest qubit index referenced, or `None` for an identity term.
    pub fn max_qubit(&self) -> Option<u32> {
        self.operations.last().map(|(q, _)| *q)
    }
}

impl fmt::Display for PauliTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coefficient)?;
        for (qubit, op) in &self.operations {
            write!(f, "*{op}{qubit}")?;
        }
        Ok(())
    }
}

/// An ordered sum of Pauli terms.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PauliSum {
    terms: Vec<PauliTerm>,
}

impl PauliSum {
    /// Create from a list of terms. Order is preserved.
    pub fn from_terms(terms: Vec<PauliTerm>) -> Self {
        Self { terms }
    }

    /// All terms, in insertion order.
    pub fn terms(&self) -> &[PauliTerm] {
        &self.terms
    }

    /// Number of terms.
    pub fn n_terms(&self) -> usize {
        self.terms.len()
    }

    /// True if the sum has no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// The minimum number of qubits required to represent this operator.
    ///
    /// Returns 0 if the operator is empty or purely identity.
    pub fn min_qubits(&self) -> u32 {
        self.terms
            .iter()
            .filter_map(PauliTerm::max_qubit)
            .max()
            .map_or(0, |q| q + 1)
    }
}

impl From<PauliTerm> for PauliSum {
    fn from(term: PauliTerm) -> Self {
        Self { terms: vec![term] }
    }
}

impl FromIterator<PauliTerm> for PauliSum {
    fn from_iter<T: IntoIterator<Item = PauliTerm>>(iter: T) -> Self {
        Self {
            terms: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for PauliSum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{term}")?;
        }
        Ok(())
    }
}
