//! Pauli observables and their OpenFermion-style text form.
//!
//! The text form is a sequence of `coefficient [ops]` groups joined by `+`,
//! e.g. `2.0 [Z0 Z1] + (0.5-1j) [X2] + 1.5 []`. An empty bracket is the
//! identity. Coefficients are real literals, `(re±imj)` pairs or bare `imj`.

use num_complex::Complex64;
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{EngineError, EngineResult};
use crate::gate::pauli_masks;
use crate::state::QuantumState;

/// Non-identity Pauli letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pauli {
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// Parse an upper-case letter. `I` is not a [`Pauli`].
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'X' => Some(Pauli::X),
            'Y' => Some(Pauli::Y),
            'Z' => Some(Pauli::Z),
            _ => None,
        }
    }
}

impl fmt::Display for Pauli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        };
        write!(f, "{letter}")
    }
}

/// A weighted Pauli string: one term of an [`Observable`].
#[derive(Debug, Clone, PartialEq)]
pub struct PauliOperator {
    coefficient: Complex64,
    targets: Vec<usize>,
    paulis: Vec<Pauli>,
}

impl PauliOperator {
    /// Identity term with the given coefficient.
    pub fn new(coefficient: Complex64) -> Self {
        Self {
            coefficient,
            targets: Vec::new(),
            paulis: Vec::new(),
        }
    }

    /// Append a Pauli acting on `target`.
    pub fn add_single_pauli(&mut self, target: usize, pauli: Pauli) -> EngineResult<()> {
        if self.targets.contains(&target) {
            return Err(EngineError::DuplicateQubit(target));
        }
        self.targets.push(target);
        self.paulis.push(pauli);
        Ok(())
    }

    pub fn coefficient(&self) -> Complex64 {
        self.coefficient
    }

    pub fn targets(&self) -> &[usize] {
        &self.targets
    }

    pub fn paulis(&self) -> &[Pauli] {
        &self.paulis
    }

    /// `coefficient · ⟨ψ|P|ψ⟩`.
    pub fn expectation_value(&self, state: &QuantumState) -> EngineResult<Complex64> {
        for &q in &self.targets {
            state.check_qubit(q)?;
        }
        let masks = pauli_masks(&self.targets, &self.paulis);
        Ok(self.coefficient * state.pauli_expectation(&masks))
    }
}

/// A sum of [`PauliOperator`] terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Observable {
    terms: Vec<PauliOperator>,
}

impl Observable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_term(&mut self, term: PauliOperator) {
        self.terms.push(term);
    }

    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    pub fn term(&self, index: usize) -> Option<&PauliOperator> {
        self.terms.get(index)
    }

    pub fn terms(&self) -> &[PauliOperator] {
        &self.terms
    }

    pub fn into_terms(self) -> Vec<PauliOperator> {
        self.terms
    }

    /// Sum of the term expectation values.
    pub fn expectation_value(&self, state: &QuantumState) -> EngineResult<Complex64> {
        self.terms
            .iter()
            .map(|t| t.expectation_value(state))
            .sum()
    }

    /// Parse OpenFermion-style text into an observable.
    pub fn from_openfermion_text(text: &str) -> EngineResult<Self> {
        let mut observable = Observable::new();
        let mut rest = text.trim();

        while !rest.is_empty() {
            let open = rest.find('[').ok_or_else(|| parse_error(rest, "missing '['"))?;
            let close = rest[open..]
                .find(']')
                .map(|i| open + i)
                .ok_or_else(|| parse_error(rest, "missing ']'"))?;

            let coefficient = parse_coefficient(&rest[..open])?;
            let mut term = PauliOperator::new(coefficient);
            let mut seen = BTreeSet::new();
            for token in rest[open + 1..close].split_whitespace() {
                let (qubit, pauli) = parse_op(token)?;
                if !seen.insert(qubit) {
                    return Err(parse_error(token, "qubit repeated within a term"));
                }
                if let Some(pauli) = pauli {
                    term.add_single_pauli(qubit, pauli)?;
                }
            }
            observable.add_term(term);

            rest = rest[close + 1..].trim_start();
        }

        if observable.terms.is_empty() {
            return Err(parse_error(text, "no terms"));
        }
        Ok(observable)
    }
}

fn parse_error(text: &str, reason: &str) -> EngineError {
    EngineError::ObservableParse {
        text: text.to_string(),
        reason: reason.to_string(),
    }
}

fn parse_op(token: &str) -> EngineResult<(usize, Option<Pauli>)> {
    let mut chars = token.chars();
    let letter = chars
        .next()
        .ok_or_else(|| parse_error(token, "empty operator"))?;
    let pauli = match letter {
        'I' => None,
        other => {
            Some(Pauli::from_letter(other).ok_or_else(|| parse_error(token, "unknown Pauli letter"))?)
        }
    };
    let qubit = chars
        .as_str()
        .parse::<usize>()
        .map_err(|_| parse_error(token, "invalid qubit index"))?;
    Ok((qubit, pauli))
}

fn parse_coefficient(raw: &str) -> EngineResult<Complex64> {
    let compact: String = raw.split_whitespace().collect();
    // Terms after the first are joined with '+'.
    let body = compact.strip_prefix('+').unwrap_or(&compact);
    let body = match body.strip_prefix('(') {
        Some(inner) => inner
            .strip_suffix(')')
            .ok_or_else(|| parse_error(raw, "unbalanced parenthesis"))?,
        None => body,
    };

    if body.is_empty() {
        return Ok(Complex64::new(1.0, 0.0));
    }

    let real = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| parse_error(raw, "invalid number"))
    };

    let Some(imag_part) = body.strip_suffix('j') else {
        return Ok(Complex64::new(real(body)?, 0.0));
    };

    // Split at the last sign that does not belong to an exponent.
    let bytes = imag_part.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| matches!(bytes[i], b'+' | b'-') && !matches!(bytes[i - 1], b'e' | b'E'));

    let (re, im) = match split {
        Some(i) => (real(&imag_part[..i])?, &imag_part[i..]),
        None => (0.0, imag_part),
    };
    let im = match im {
        "" | "+" => 1.0,
        "-" => -1.0,
        other => real(other)?,
    };
    Ok(Complex64::new(re, im))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::NativeGate;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_parse_single_term() {
        let obs = Observable::from_openfermion_text("2.0 [Z0 Z1]").unwrap();
        assert_eq!(obs.term_count(), 1);
        let term = obs.term(0).unwrap();
        assert_eq!(term.coefficient(), c(2.0, 0.0));
        assert_eq!(term.targets(), &[0, 1]);
        assert_eq!(term.paulis(), &[Pauli::Z, Pauli::Z]);
    }

    #[test]
    fn test_parse_identity_and_sum() {
        let obs = Observable::from_openfermion_text("1.5 [] + -0.25 [X3 Y1]").unwrap();
        assert_eq!(obs.term_count(), 2);
        assert!(obs.term(0).unwrap().targets().is_empty());
        assert_eq!(obs.term(1).unwrap().coefficient(), c(-0.25, 0.0));
        assert_eq!(obs.term(1).unwrap().targets(), &[3, 1]);
        assert!(obs.term(2).is_none());
    }

    #[test]
    fn test_parse_complex_coefficients() {
        let cases = [
            ("(1+2j) [X0]", c(1.0, 2.0)),
            ("(0.5-1.5j) [X0]", c(0.5, -1.5)),
            ("(-1e-3+2.5e+2j) [X0]", c(-1e-3, 250.0)),
            ("-2j [X0]", c(0.0, -2.0)),
            ("[X0]", c(1.0, 0.0)),
        ];
        for (text, expected) in cases {
            let obs = Observable::from_openfermion_text(text).unwrap();
            assert_eq!(obs.term(0).unwrap().coefficient(), expected, "{text}");
        }
    }

    #[test]
    fn test_parse_skips_identity_letters() {
        let obs = Observable::from_openfermion_text("1.0 [I0 Z2]").unwrap();
        assert_eq!(obs.term(0).unwrap().targets(), &[2]);
    }

    #[test]
    fn test_parse_errors() {
        for text in ["", "1.0 Z0", "1.0 [Z0", "abc [Z0]", "1.0 [Q0]", "1.0 [Zx]", "1.0 [Z0 X0]"] {
            assert!(
                matches!(
                    Observable::from_openfermion_text(text),
                    Err(EngineError::ObservableParse { .. })
                ),
                "{text:?} should not parse"
            );
        }
    }

    #[test]
    fn test_expectation_values() {
        let mut state = QuantumState::new(2);
        let z0 = Observable::from_openfermion_text("1.0 [Z0]").unwrap();
        assert_eq!(z0.expectation_value(&state).unwrap(), c(1.0, 0.0));

        NativeGate::X(0).update_quantum_state(&mut state).unwrap();
        let value = z0.term(0).unwrap().expectation_value(&state).unwrap();
        assert!((value - c(-1.0, 0.0)).norm() < 1e-12);

        // |+0⟩: ⟨X0⟩ = 1, ⟨Z1⟩ = 1
        let mut plus = QuantumState::new(2);
        NativeGate::H(0).update_quantum_state(&mut plus).unwrap();
        let sum = Observable::from_openfermion_text("0.5 [X0] + 2.0 [Z1] + 3.0 []").unwrap();
        assert!((sum.expectation_value(&plus).unwrap() - c(5.5, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_expectation_out_of_range() {
        let state = QuantumState::new(1);
        let obs = Observable::from_openfermion_text("1.0 [Z3]").unwrap();
        assert!(matches!(
            obs.term(0).unwrap().expectation_value(&state),
            Err(EngineError::QubitOutOfRange { qubit: 3, .. })
        ));
    }
}
