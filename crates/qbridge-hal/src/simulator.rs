//! The simulator trait.
//!
//! | Method | Required | Counts usage |
//! |--------|----------|--------------|
//! | `name()` | yes | no |
//! | `usage()` | yes | no |
//! | `run_circuit_and_measure()` | yes | no |
//! | `get_exact_expectation_values()` | yes | yes |
//! | `wavefunction_from_native_circuit()` | yes | no |
//! | `can_be_executed_natively()` | yes | no |
//! | `qubit_limit()` | provided | no |
//! | `get_wavefunction()` | provided | no |
//! | `run_circuitset_and_measure()` | provided | no |

use tracing::debug;

use qbridge_ir::{Circuit, Instruction, PauliSum, Wavefunction};

use crate::error::{HalError, HalResult};
use crate::result::{ExpectationValues, Measurements};
use crate::usage::UsageCounters;

/// A simulator that exposes its final state.
///
/// All calls are synchronous. Implementations must be `Send + Sync` so a
/// single instance can be shared between threads.
pub trait QuantumSimulator: Send + Sync {
    /// Get the name of this simulator.
    fn name(&self) -> &str;

    /// Usage counters of this instance.
    fn usage(&self) -> &UsageCounters;

    /// Circuits run so far.
    fn number_of_circuits_run(&self) -> u64 {
        self.usage().circuits_run()
    }

    /// Jobs run so far.
    fn number_of_jobs_run(&self) -> u64 {
        self.usage().jobs_run()
    }

    /// Widest circuit the simulator accepts, if it has a limit.
    fn qubit_limit(&self) -> Option<usize> {
        None
    }

    /// Whether several circuits can be submitted as one job.
    fn supports_batching(&self) -> bool {
        false
    }

    /// Run `circuit` from the all-zero state and sample `n_samples` bitstrings.
    fn run_circuit_and_measure(&self, circuit: &Circuit, n_samples: usize)
    -> HalResult<Measurements>;

    /// Run each circuit with its own sample count.
    fn run_circuitset_and_measure(
        &self,
        circuits: &[Circuit],
        n_samples: &[usize],
    ) -> HalResult<Vec<Measurements>> {
        if circuits.len() != n_samples.len() {
            return Err(HalError::InvalidShots(format!(
                "{} circuits but {} sample counts",
                circuits.len(),
                n_samples.len()
            )));
        }
        debug!("Running circuit set of {} circuits", circuits.len());
        circuits
            .iter()
            .zip(n_samples)
            .map(|(circuit, &n)| self.run_circuit_and_measure(circuit, n))
            .collect()
    }

    /// Exact expectation value of every term of `operator`, in term order.
    fn get_exact_expectation_values(
        &self,
        circuit: &Circuit,
        operator: &PauliSum,
    ) -> HalResult<ExpectationValues>;

    /// Final state of `circuit` applied to `initial_state`.
    ///
    /// Callers guarantee every instruction passes
    /// [`can_be_executed_natively`](Self::can_be_executed_natively).
    fn wavefunction_from_native_circuit(
        &self,
        circuit: &Circuit,
        initial_state: &Wavefunction,
    ) -> HalResult<Wavefunction>;

    /// Whether the simulator applies `instruction` itself.
    fn can_be_executed_natively(&self, instruction: &Instruction) -> bool;

    /// Final state of `circuit`, starting from `initial_state` or `|0…0⟩`.
    fn get_wavefunction(
        &self,
        circuit: &Circuit,
        initial_state: Option<&Wavefunction>,
    ) -> HalResult<Wavefunction> {
        if let Some(limit) = self.qubit_limit() {
            if circuit.num_qubits() > limit {
                return Err(HalError::CircuitTooLarge(format!(
                    "{} qubits exceed the {limit}-qubit limit of {}",
                    circuit.num_qubits(),
                    self.name()
                )));
            }
        }

        if let Some(instruction) = circuit
            .instructions()
            .iter()
            .find(|inst| !self.can_be_executed_natively(inst))
        {
            return Err(HalError::Unsupported(format!(
                "'{}' cannot be executed natively by {}",
                instruction.name(),
                self.name()
            )));
        }

        match initial_state {
            Some(state) => self.wavefunction_from_native_circuit(circuit, state),
            None => {
                let zero = Wavefunction::zero_state(circuit.num_qubits())?;
                self.wavefunction_from_native_circuit(circuit, &zero)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbridge_ir::{ClbitId, QubitId};

    /// Leaves every state untouched and samples all-zero bitstrings.
    struct IdleSimulator {
        usage: UsageCounters,
    }

    impl QuantumSimulator for IdleSimulator {
        fn name(&self) -> &str {
            "idle"
        }

        fn usage(&self) -> &UsageCounters {
            &self.usage
        }

        fn run_circuit_and_measure(
            &self,
            circuit: &Circuit,
            n_samples: usize,
        ) -> HalResult<Measurements> {
            Ok(Measurements::new(vec![
                vec![0; circuit.num_qubits()];
                n_samples
            ]))
        }

        fn get_exact_expectation_values(
            &self,
            _circuit: &Circuit,
            operator: &PauliSum,
        ) -> HalResult<ExpectationValues> {
            self.usage.record_job(1);
            Ok(ExpectationValues::new(vec![0.0; operator.n_terms()]))
        }

        fn wavefunction_from_native_circuit(
            &self,
            _circuit: &Circuit,
            initial_state: &Wavefunction,
        ) -> HalResult<Wavefunction> {
            Ok(initial_state.clone())
        }

        fn can_be_executed_natively(&self, instruction: &Instruction) -> bool {
            instruction.is_gate()
        }
    }

    fn idle() -> IdleSimulator {
        IdleSimulator {
            usage: UsageCounters::new(),
        }
    }

    #[test]
    fn test_defaults() {
        let sim = idle();
        assert!(!sim.supports_batching());
        assert_eq!(sim.number_of_circuits_run(), 0);
        sim.get_exact_expectation_values(&Circuit::with_size("c", 1, 0), &PauliSum::default())
            .unwrap();
        assert_eq!(sim.number_of_circuits_run(), 1);
        assert_eq!(sim.number_of_jobs_run(), 1);
    }

    #[test]
    fn test_get_wavefunction_defaults_to_zero_state() {
        let sim = idle();
        let circuit = Circuit::bell().unwrap();
        let wf = sim.get_wavefunction(&circuit, None).unwrap();
        assert_eq!(wf, Wavefunction::zero_state(2).unwrap());
    }

    #[test]
    fn test_get_wavefunction_checks_qubit_limit_first() {
        struct NarrowSimulator(IdleSimulator);

        impl QuantumSimulator for NarrowSimulator {
            fn name(&self) -> &str {
                "narrow"
            }
            fn usage(&self) -> &UsageCounters {
                self.0.usage()
            }
            fn qubit_limit(&self) -> Option<usize> {
                Some(4)
            }
            fn run_circuit_and_measure(&self, c: &Circuit, n: usize) -> HalResult<Measurements> {
                self.0.run_circuit_and_measure(c, n)
            }
            fn get_exact_expectation_values(
                &self,
                c: &Circuit,
                op: &PauliSum,
            ) -> HalResult<ExpectationValues> {
                self.0.get_exact_expectation_values(c, op)
            }
            fn wavefunction_from_native_circuit(
                &self,
                c: &Circuit,
                wf: &Wavefunction,
            ) -> HalResult<Wavefunction> {
                self.0.wavefunction_from_native_circuit(c, wf)
            }
            fn can_be_executed_natively(&self, inst: &Instruction) -> bool {
                self.0.can_be_executed_natively(inst)
            }
        }

        let sim = NarrowSimulator(idle());
        let err = sim
            .get_wavefunction(&Circuit::with_size("wide", 64, 0), None)
            .unwrap_err();
        assert!(matches!(err, HalError::CircuitTooLarge(msg) if msg.contains("64")));
        assert!(sim.get_wavefunction(&Circuit::ghz(4).unwrap(), None).is_ok());
    }

    #[test]
    fn test_get_wavefunction_without_limit_rejects_unrepresentable_width() {
        let err = idle()
            .get_wavefunction(&Circuit::with_size("wide", 64, 0), None)
            .unwrap_err();
        assert!(matches!(err, HalError::Ir(_)));
    }

    #[test]
    fn test_get_wavefunction_rejects_measurement() {
        let sim = idle();
        let mut circuit = Circuit::with_size("m", 1, 1);
        circuit.h(QubitId(0)).unwrap();
        circuit.measure(QubitId(0), ClbitId(0)).unwrap();
        let err = sim.get_wavefunction(&circuit, None).unwrap_err();
        assert!(matches!(err, HalError::Unsupported(msg) if msg.contains("measure")));
    }

    #[test]
    fn test_circuitset() {
        let sim = idle();
        let circuits = vec![Circuit::bell().unwrap(), Circuit::ghz(3).unwrap()];
        let results = sim.run_circuitset_and_measure(&circuits, &[5, 2]).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].len(), 5);
        assert_eq!(results[1].bitstrings()[0].len(), 3);

        let err = sim.run_circuitset_and_measure(&circuits, &[5]).unwrap_err();
        assert!(matches!(err, HalError::InvalidShots(_)));
    }
}
