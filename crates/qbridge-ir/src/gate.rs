//! Gate definitions.
//!
//! | Gate | Definition |
//! |------|------------|
//! | `S`, `T` | `diag(1, i)`, `diag(1, e^{iπ/4})` |
//! | `SX` | `½[[1+i, 1-i], [1-i, 1+i]]` |
//! | `RX(θ)`, `RY(θ)`, `RZ(θ)` | `exp(-iθσ/2)` |
//! | `PHASE(θ)` | `diag(1, e^{iθ})` |
//! | `U3(θ, φ, λ)` | `[[cos θ/2, -e^{iλ} sin θ/2], [e^{iφ} sin θ/2, e^{i(φ+λ)} cos θ/2]]` |
//! | `PRX(θ, φ)` | `RZ(φ)·RX(θ)·RZ(-φ)` |
//! | `XX(θ)`, `YY(θ)`, `ZZ(θ)` | `exp(-iθ/2 · σ⊗σ)` |
//!
//! Controlled gates take the control(s) first.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::parameter::ParameterExpression;

type Param = ParameterExpression;

/// Built-in gates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    I,
    X,
    Y,
    Z,
    H,
    S,
    /// S†.
    Sdg,
    T,
    /// T†.
    Tdg,
    /// √X.
    SX,
    /// √X†.
    SXdg,
    Rx(Param),
    Ry(Param),
    Rz(Param),
    P(Param),
    /// U3(θ, φ, λ).
    U(Param, Param, Param),
    /// Phased X rotation PRX(θ, φ).
    PRX(Param, Param),
    CX,
    CY,
    CZ,
    CH,
    Swap,
    ISwap,
    CRx(Param),
    CRy(Param),
    CRz(Param),
    CP(Param),
    RXX(Param),
    RYY(Param),
    RZZ(Param),
    /// Toffoli.
    CCX,
    /// Fredkin.
    CSwap,
}

impl StandardGate {
    /// Framework name of the gate.
    pub fn name(&self) -> &'static str {
        use StandardGate::*;
        match self {
            I => "I",
            X => "X",
            Y => "Y",
            Z => "Z",
            H => "H",
            S => "S",
            Sdg => "SDG",
            T => "T",
            Tdg => "TDG",
            SX => "SX",
            SXdg => "SXDG",
            Rx(_) => "RX",
            Ry(_) => "RY",
            Rz(_) => "RZ",
            P(_) => "PHASE",
            U(..) => "U3",
            PRX(..) => "PRX",
            CX => "CNOT",
            CY => "CY",
            CZ => "CZ",
            CH => "CH",
            Swap => "SWAP",
            ISwap => "ISWAP",
            CRx(_) => "CRX",
            CRy(_) => "CRY",
            CRz(_) => "CRZ",
            CP(_) => "CPHASE",
            RXX(_) => "XX",
            RYY(_) => "YY",
            RZZ(_) => "ZZ",
            CCX => "CCX",
            CSwap => "CSWAP",
        }
    }

    /// Number of qubits the gate acts on.
    pub fn num_qubits(&self) -> u32 {
        use StandardGate::*;
        match self {
            CCX | CSwap => 3,
            CX | CY | CZ | CH | Swap | ISwap => 2,
            CRx(_) | CRy(_) | CRz(_) | CP(_) | RXX(_) | RYY(_) | RZZ(_) => 2,
            _ => 1,
        }
    }

    /// The gate's parameters, in signature order.
    pub fn parameters(&self) -> Vec<&Param> {
        use StandardGate::*;
        match self {
            Rx(p) | Ry(p) | Rz(p) | P(p) => vec![p],
            CRx(p) | CRy(p) | CRz(p) | CP(p) | RXX(p) | RYY(p) | RZZ(p) => vec![p],
            U(theta, phi, lambda) => vec![theta, phi, lambda],
            PRX(theta, phi) => vec![theta, phi],
            _ => Vec::new(),
        }
    }

    /// True while any parameter is still symbolic.
    pub fn is_parameterized(&self) -> bool {
        self.parameters().iter().any(|p| p.is_symbolic())
    }

    /// The same gate with every parameter passed through `f`.
    pub fn map_parameters(&self, f: impl Fn(&Param) -> Param) -> Self {
        use StandardGate::*;
        match self {
            Rx(p) => Rx(f(p)),
            Ry(p) => Ry(f(p)),
            Rz(p) => Rz(f(p)),
            P(p) => P(f(p)),
            U(theta, phi, lambda) => U(f(theta), f(phi), f(lambda)),
            PRX(theta, phi) => PRX(f(theta), f(phi)),
            CRx(p) => CRx(f(p)),
            CRy(p) => CRy(f(p)),
            CRz(p) => CRz(f(p)),
            CP(p) => CP(f(p)),
            RXX(p) => RXX(f(p)),
            RYY(p) => RYY(f(p)),
            RZZ(p) => RZZ(f(p)),
            fixed => fixed.clone(),
        }
    }
}

/// A unitary supplied by the user.
///
/// `matrix` is row-major over the instruction's qubits in the order they are
/// listed, first qubit most significant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomGate {
    pub name: String,
    pub num_qubits: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<Vec<Complex64>>,
}

impl CustomGate {
    /// An opaque gate: known by name and width only.
    pub fn new(name: impl Into<String>, num_qubits: u32) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            matrix: None,
        }
    }

    /// Attach the gate's `2^n × 2^n` unitary.
    ///
    /// # Panics
    ///
    /// Panics if `matrix.len()` is not `4^num_qubits`.
    #[must_use]
    pub fn with_matrix(mut self, matrix: Vec<Complex64>) -> Self {
        let dim = 1usize << self.num_qubits;
        assert_eq!(
            matrix.len(),
            dim * dim,
            "{} entries do not match a {}-qubit unitary",
            matrix.len(),
            self.num_qubits,
        );
        self.matrix = Some(matrix);
        self
    }
}

/// Either a built-in or a user-supplied gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    Standard(StandardGate),
    Custom(CustomGate),
}

impl GateKind {
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Custom(g) => &g.name,
        }
    }

    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Custom(g) => g.num_qubits,
        }
    }
}

/// Apply the gate only when `register` reads `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassicalCondition {
    pub register: String,
    pub value: u64,
}

impl ClassicalCondition {
    pub fn new(register: impl Into<String>, value: u64) -> Self {
        Self {
            register: register.into(),
            value,
        }
    }
}

/// A gate as it appears in a circuit, with its optional classical condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    pub kind: GateKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<ClassicalCondition>,
}

impl Gate {
    pub fn standard(gate: StandardGate) -> Self {
        GateKind::Standard(gate).into()
    }

    pub fn custom(gate: CustomGate) -> Self {
        GateKind::Custom(gate).into()
    }

    #[must_use]
    pub fn with_condition(mut self, condition: ClassicalCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn is_conditioned(&self) -> bool {
        self.condition.is_some()
    }

    pub fn name(&self) -> &str {
        self.kind.name()
    }

    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }
}

impl From<GateKind> for Gate {
    fn from(kind: GateKind) -> Self {
        Self {
            kind,
            condition: None,
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<CustomGate> for Gate {
    fn from(gate: CustomGate) -> Self {
        Gate::custom(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_arity() {
        assert_eq!(StandardGate::SXdg.num_qubits(), 1);
        assert_eq!(StandardGate::PRX(PI.into(), 0.0.into()).num_qubits(), 1);
        assert_eq!(StandardGate::CP(PI.into()).num_qubits(), 2);
        assert_eq!(StandardGate::ISwap.num_qubits(), 2);
        assert_eq!(StandardGate::CSwap.num_qubits(), 3);
    }

    #[test]
    fn test_framework_names() {
        assert_eq!(StandardGate::CX.name(), "CNOT");
        assert_eq!(StandardGate::P(PI.into()).name(), "PHASE");
        assert_eq!(StandardGate::RZZ(PI.into()).name(), "ZZ");
        assert_eq!(Gate::custom(CustomGate::new("oracle", 3)).name(), "oracle");
    }

    #[test]
    fn test_symbolic_parameters() {
        assert!(!StandardGate::H.is_parameterized());
        assert!(!StandardGate::Rx(Param::constant(PI)).is_parameterized());
        assert!(StandardGate::CRz(Param::symbol("theta")).is_parameterized());

        let u = StandardGate::U("a".into(), 0.5.into(), "b".into());
        let bound = u.map_parameters(|p| {
            if p.is_symbolic() {
                Param::constant(1.0)
            } else {
                p.clone()
            }
        });
        assert!(!bound.is_parameterized());
        assert_eq!(bound.parameters().len(), 3);
        assert_eq!(StandardGate::CX.map_parameters(|p| p.clone()), StandardGate::CX);
    }

    #[test]
    fn test_condition() {
        let plain = Gate::standard(StandardGate::X);
        assert!(!plain.is_conditioned());
        let conditioned = plain.with_condition(ClassicalCondition::new("c", 1));
        assert!(conditioned.is_conditioned());
        assert_eq!(conditioned.num_qubits(), 1);
    }

    #[test]
    #[should_panic(expected = "do not match")]
    fn test_custom_gate_rejects_wrong_matrix_size() {
        let _ = CustomGate::new("bad", 1).with_matrix(vec![Complex64::new(1.0, 0.0); 3]);
    }
}
