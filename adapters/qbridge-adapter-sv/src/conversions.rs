//! Circuit translation into the engine's native circuit.
//!
//! Framework qubit `q` is engine qubit `q`; the bit-order difference between
//! the two sides is handled on the state vectors, not here.

use std::f64::consts::FRAC_PI_2;

use ndarray::Array2;

use qbridge_ir::{Circuit, GateKind, Instruction, InstructionKind, StandardGate};
use qbridge_statevector::gate::{hadamard, pauli_y, phase, rx, ry, rz};
use qbridge_statevector::{NativeCircuit, NativeGate, Pauli};

use crate::error::{AdapterError, AdapterResult};

/// Translate a whole circuit.
///
/// Every instruction must be an unconditioned gate with bound parameters.
pub fn convert_to_native(circuit: &Circuit) -> AdapterResult<NativeCircuit> {
    let mut native = NativeCircuit::new(circuit.num_qubits());
    for instruction in circuit.instructions() {
        native.add_gate(convert_instruction(instruction)?);
    }
    Ok(native)
}

/// Translate one gate instruction.
pub fn convert_instruction(instruction: &Instruction) -> AdapterResult<NativeGate> {
    let InstructionKind::Gate(gate) = &instruction.kind else {
        return Err(AdapterError::UnsupportedOperation(format!(
            "'{}' is not a gate",
            instruction.name()
        )));
    };
    if gate.is_conditioned() {
        return Err(AdapterError::UnsupportedOperation(format!(
            "classically conditioned '{}'",
            gate.name()
        )));
    }

    let q: Vec<usize> = instruction.qubits.iter().map(|q| q.index()).collect();
    if q.len() != gate.num_qubits() as usize {
        return Err(AdapterError::UnsupportedOperation(format!(
            "'{}' needs {} qubits, instruction lists {}",
            gate.name(),
            gate.num_qubits(),
            q.len()
        )));
    }

    match &gate.kind {
        GateKind::Standard(g) => convert_standard(g, &q),
        GateKind::Custom(custom) => {
            let matrix = custom.matrix.as_ref().ok_or_else(|| {
                AdapterError::UnsupportedOperation(format!(
                    "custom gate '{}' has no matrix",
                    custom.name
                ))
            })?;
            let dim = 1usize << q.len();
            let matrix = Array2::from_shape_vec((dim, dim), matrix.clone()).map_err(|_| {
                AdapterError::UnsupportedOperation(format!(
                    "custom gate '{}' matrix does not match its {} qubits",
                    custom.name,
                    q.len()
                ))
            })?;
            // Framework matrices put the first listed qubit in the most
            // significant bit; the engine expects it in the least.
            Ok(NativeGate::DenseMatrix {
                targets: q.iter().rev().copied().collect(),
                matrix,
            })
        }
    }
}

fn convert_standard(gate: &StandardGate, q: &[usize]) -> AdapterResult<NativeGate> {
    let controlled = |matrix| NativeGate::Controlled {
        control: q[0],
        target: q[1],
        matrix,
    };
    let pauli_pair = |pauli, angle| NativeGate::PauliRotation {
        targets: vec![q[0], q[1]],
        paulis: vec![pauli, pauli],
        angle,
    };

    let native = match gate {
        StandardGate::I => NativeGate::Identity(q[0]),
        StandardGate::X => NativeGate::X(q[0]),
        StandardGate::Y => NativeGate::Y(q[0]),
        StandardGate::Z => NativeGate::Z(q[0]),
        StandardGate::H => NativeGate::H(q[0]),
        StandardGate::S => NativeGate::S(q[0]),
        StandardGate::Sdg => NativeGate::Sdag(q[0]),
        StandardGate::T => NativeGate::T(q[0]),
        StandardGate::Tdg => NativeGate::Tdag(q[0]),
        StandardGate::SX => NativeGate::SqrtX(q[0]),
        StandardGate::SXdg => NativeGate::SqrtXdag(q[0]),
        StandardGate::Rx(theta) => NativeGate::RX(q[0], theta.evaluate()?),
        StandardGate::Ry(theta) => NativeGate::RY(q[0], theta.evaluate()?),
        StandardGate::Rz(theta) => NativeGate::RZ(q[0], theta.evaluate()?),
        StandardGate::P(theta) => NativeGate::Phase(q[0], theta.evaluate()?),
        StandardGate::U(theta, phi, lambda) => NativeGate::U3 {
            target: q[0],
            theta: theta.evaluate()?,
            phi: phi.evaluate()?,
            lambda: lambda.evaluate()?,
        },
        // PRX(θ, φ) = RZ(φ)·RX(θ)·RZ(-φ) = U3(θ, φ - π/2, π/2 - φ)
        StandardGate::PRX(theta, phi) => {
            let phi = phi.evaluate()?;
            NativeGate::U3 {
                target: q[0],
                theta: theta.evaluate()?,
                phi: phi - FRAC_PI_2,
                lambda: FRAC_PI_2 - phi,
            }
        }
        StandardGate::CX => NativeGate::CNOT {
            control: q[0],
            target: q[1],
        },
        StandardGate::CZ => NativeGate::CZ {
            control: q[0],
            target: q[1],
        },
        StandardGate::CY => controlled(pauli_y()),
        StandardGate::CH => controlled(hadamard()),
        StandardGate::CRx(theta) => controlled(rx(theta.evaluate()?)),
        StandardGate::CRy(theta) => controlled(ry(theta.evaluate()?)),
        StandardGate::CRz(theta) => controlled(rz(theta.evaluate()?)),
        StandardGate::CP(theta) => controlled(phase(theta.evaluate()?)),
        StandardGate::Swap => NativeGate::Swap(q[0], q[1]),
        StandardGate::ISwap => NativeGate::ISwap(q[0], q[1]),
        StandardGate::RXX(theta) => pauli_pair(Pauli::X, theta.evaluate()?),
        StandardGate::RYY(theta) => pauli_pair(Pauli::Y, theta.evaluate()?),
        StandardGate::RZZ(theta) => pauli_pair(Pauli::Z, theta.evaluate()?),
        StandardGate::CCX => NativeGate::Toffoli {
            controls: [q[0], q[1]],
            target: q[2],
        },
        StandardGate::CSwap => NativeGate::Fredkin {
            control: q[0],
            targets: [q[1], q[2]],
        },
    };
    Ok(native)
}

/// Whether `instruction` is a gate.
///
/// Classically conditioned gates pass this check and are rejected later by
/// [`convert_instruction`].
pub fn is_native_instruction(instruction: &Instruction) -> bool {
    instruction.is_gate()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use qbridge_ir::{
        ClassicalCondition, ClbitId, CustomGate, Gate, IrError, ParameterExpression, QubitId,
    };
    use qbridge_statevector::QuantumState;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    fn final_state(circuit: &Circuit) -> QuantumState {
        let native = convert_to_native(circuit).unwrap();
        let mut state = QuantumState::new(circuit.num_qubits());
        native.update_quantum_state(&mut state).unwrap();
        state
    }

    fn assert_states_close(a: &QuantumState, b: &QuantumState) {
        for (x, y) in a.amplitudes().iter().zip(b.amplitudes()) {
            assert!((x - y).norm() < 1e-10, "{x} != {y}");
        }
    }

    #[test]
    fn test_gate_mapping() {
        let mut circuit = Circuit::with_size("map", 3, 0);
        circuit
            .h(QubitId(0))
            .unwrap()
            .cx(QubitId(0), QubitId(2))
            .unwrap()
            .rz(0.5, QubitId(1))
            .unwrap()
            .ccx(QubitId(0), QubitId(1), QubitId(2))
            .unwrap();

        let native = convert_to_native(&circuit).unwrap();
        assert_eq!(native.num_qubits(), 3);
        assert_eq!(
            native.gates(),
            &[
                NativeGate::H(0),
                NativeGate::CNOT {
                    control: 0,
                    target: 2
                },
                NativeGate::RZ(1, 0.5),
                NativeGate::Toffoli {
                    controls: [0, 1],
                    target: 2
                },
            ]
        );
    }

    #[test]
    fn test_prx_matches_definition() {
        let (theta, phi) = (0.7, 0.3);
        let mut prx = Circuit::with_size("prx", 1, 0);
        prx.h(QubitId(0)).unwrap().prx(theta, phi, QubitId(0)).unwrap();

        let mut expanded = Circuit::with_size("expanded", 1, 0);
        expanded
            .h(QubitId(0))
            .unwrap()
            .rz(-phi, QubitId(0))
            .unwrap()
            .rx(theta, QubitId(0))
            .unwrap()
            .rz(phi, QubitId(0))
            .unwrap();

        assert_states_close(&final_state(&prx), &final_state(&expanded));
    }

    #[test]
    fn test_controlled_rotation_needs_control() {
        let mut idle = Circuit::with_size("idle", 2, 0);
        idle.cry(1.0, QubitId(0), QubitId(1)).unwrap();
        assert!((final_state(&idle).amplitudes()[0] - c(1.0, 0.0)).norm() < 1e-12);

        let mut active = Circuit::with_size("active", 2, 0);
        active
            .x(QubitId(0))
            .unwrap()
            .cry(std::f64::consts::PI, QubitId(0), QubitId(1))
            .unwrap();
        // engine index: qubit 0 is bit 0, qubit 1 is bit 1
        assert!((final_state(&active).amplitudes()[0b11] - c(1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_rzz_phase() {
        let mut circuit = Circuit::with_size("rzz", 2, 0);
        circuit
            .x(QubitId(0))
            .unwrap()
            .rzz(0.8, QubitId(0), QubitId(1))
            .unwrap();
        // ZZ|01⟩ = -|01⟩, so the phase is e^{+iθ/2}
        let amp = final_state(&circuit).amplitudes()[0b01];
        assert!((amp - Complex64::from_polar(1.0, 0.4)).norm() < 1e-12);
    }

    #[test]
    fn test_custom_gate_matches_cx() {
        // CX over (control, target) with the control as the high bit.
        let one = c(1.0, 0.0);
        let zero = c(0.0, 0.0);
        #[rustfmt::skip]
        let cx = vec![
            one, zero, zero, zero,
            zero, one, zero, zero,
            zero, zero, zero, one,
            zero, zero, one, zero,
        ];
        let custom = CustomGate::new("my_cx", 2).with_matrix(cx);

        let mut with_custom = Circuit::with_size("custom", 2, 0);
        with_custom
            .h(QubitId(0))
            .unwrap()
            .gate(custom, [QubitId(0), QubitId(1)])
            .unwrap();

        assert_states_close(&final_state(&with_custom), &final_state(&Circuit::bell().unwrap()));
    }

    #[test]
    fn test_custom_gate_without_matrix() {
        let mut circuit = Circuit::with_size("opaque", 1, 0);
        circuit.gate(CustomGate::new("opaque", 1), [QubitId(0)]).unwrap();
        assert!(matches!(
            convert_to_native(&circuit),
            Err(AdapterError::UnsupportedOperation(msg)) if msg.contains("opaque")
        ));
    }

    #[test]
    fn test_unbound_parameter() {
        let mut circuit = Circuit::with_size("sym", 1, 0);
        circuit
            .rx(ParameterExpression::symbol("theta"), QubitId(0))
            .unwrap();
        assert!(matches!(
            convert_to_native(&circuit),
            Err(AdapterError::Ir(IrError::UnboundParameter(name))) if name == "theta"
        ));
    }

    #[test]
    fn test_rejects_non_gates() {
        let mut circuit = Circuit::with_size("m", 1, 1);
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        assert!(!is_native_instruction(&circuit.instructions()[0]));
        assert!(matches!(
            convert_to_native(&circuit),
            Err(AdapterError::UnsupportedOperation(_))
        ));
    }

    #[test]
    fn test_rejects_wrong_arity() {
        let instruction = Instruction::gate(StandardGate::CX, [QubitId(0)]);
        assert!(matches!(
            convert_instruction(&instruction),
            Err(AdapterError::UnsupportedOperation(msg)) if msg.contains("needs 2")
        ));
    }

    #[test]
    fn test_rejects_conditioned_gate() {
        let gate = Gate::standard(StandardGate::X).with_condition(ClassicalCondition::new("c", 1));
        let instruction = Instruction::gate(gate, [QubitId(0)]);
        assert!(is_native_instruction(&instruction));
        assert!(matches!(
            convert_instruction(&instruction),
            Err(AdapterError::UnsupportedOperation(msg)) if msg.contains("conditioned")
        ));
    }
}
