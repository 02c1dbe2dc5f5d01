//! Tests for sum-of-Pauli operators.

use num_complex::Complex64;
use qbridge_ir::IrError;
use qbridge_ir::operator::{PauliOp, PauliSum, PauliTerm};

// ---------------------------------------------------------------------------
// PauliTerm
// ---------------------------------------------------------------------------

#[test]
fn term_drops_identity() {
    let t = PauliTerm::new(1.0, [(0, PauliOp::I), (1, PauliOp::Z)]).unwrap();
    assert_eq!(t.operations(), &[(1, PauliOp::Z)]);
}

#[test]
fn term_sorted_by_qubit() {
    let t = PauliTerm::new(1.0, [(3, PauliOp::X), (1, PauliOp::Z), (0, PauliOp::Y)]).unwrap();
    let qubits: Vec<u32> = t.operations().iter().map(|(q, _)| *q).collect();
    assert_eq!(qubits, vec![0, 1, 3]);
}

#[test]
fn term_rejects_duplicate_qubit() {
    let err = PauliTerm::new(1.0, [(2, PauliOp::X), (2, PauliOp::Z)]).unwrap_err();
    assert!(matches!(err, IrError::DuplicateQubit { .. }));
}

#[test]
fn term_identity_is_empty() {
    let t = PauliTerm::identity(0.5);
    assert!(t.is_identity());
    assert_eq!(t.max_qubit(), None);
    assert_eq!(t.coefficient(), Complex64::new(0.5, 0.0));
}

#[test]
fn term_shorthands() {
    assert_eq!(PauliTerm::x(2, 0.3).operations(), &[(2, PauliOp::X)]);
    assert_eq!(PauliTerm::y(0, 1.0).operations(), &[(0, PauliOp::Y)]);
    let z = PauliTerm::z(3, -0.5);
    assert!((z.coefficient().re - (-0.5)).abs() < 1e-15);
    assert_eq!(z.max_qubit(), Some(3));
}

// ---------------------------------------------------------------------------
// PauliSum
// ---------------------------------------------------------------------------

#[test]
fn sum_preserves_term_order() {
    let op = PauliSum::from_terms(vec![
        PauliTerm::z(1, 1.0),
        PauliTerm::x(0, 2.0),
        PauliTerm::identity(3.0),
    ]);
    let coeffs: Vec<f64> = op.terms().iter().map(|t| t.coefficient().re).collect();
    assert_eq!(coeffs, vec![1.0, 2.0, 3.0]);
}

#[test]
fn sum_min_qubits() {
    let op = PauliSum::from_terms(vec![
        PauliTerm::z(0, 1.0),
        PauliTerm::new(0.5, [(2, PauliOp::Z), (4, PauliOp::Z)]).unwrap(),
    ]);
    assert_eq!(op.min_qubits(), 5);
    assert_eq!(PauliSum::default().min_qubits(), 0);
}

#[test]
fn sum_from_iter_and_single_term() {
    let op: PauliSum = vec![PauliTerm::z(0, 1.0), PauliTerm::x(1, -0.5)]
        .into_iter()
        .collect();
    assert_eq!(op.n_terms(), 2);

    let single = PauliSum::from(PauliTerm::y(0, 1.0));
    assert_eq!(single.n_terms(), 1);
    assert!(!single.is_empty());
}

#[test]
fn sum_serde_roundtrip_keeps_equality() {
    let op = PauliSum::from_terms(vec![
        PauliTerm::new(Complex64::new(1.0, -2.0), [(0, PauliOp::X), (1, PauliOp::Y)]).unwrap(),
    ]);
    let json = serde_json::to_string(&op).unwrap();
    let back: PauliSum = serde_json::from_str(&json).unwrap();
    assert_eq!(back, op);
}
