//! State-vector simulator facade.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;

use num_complex::Complex64;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use qbridge_hal::{
    BackendConfig, BackendFactory, ExpectationValues, HalError, HalResult, Measurements,
    QuantumSimulator, UsageCounters,
};
use qbridge_ir::{
    Circuit, Instruction, PauliSum, Wavefunction, flip_amplitudes, sample_from_wavefunction,
};
use qbridge_statevector::QuantumState;

use crate::conversions::{convert_to_native, is_native_instruction};
use crate::error::{AdapterError, AdapterResult};
use crate::terms::{ObservableImporter, OpenFermionImporter, TermCache};

const DEFAULT_MAX_QUBITS: u32 = 20;

/// Simulator backed by the state-vector engine.
///
/// Every state vector crossing into or out of the engine is passed through
/// [`flip_amplitudes`] exactly once, so callers only ever see framework bit
/// order.
pub struct StatevectorSimulator {
    /// Backend configuration.
    config: BackendConfig,
    /// Maximum number of qubits supported.
    max_qubits: u32,
    usage: UsageCounters,
    /// Operator translations, possibly shared with other simulators.
    cache: Arc<TermCache>,
    importer: Arc<dyn ObservableImporter>,
    rng: Mutex<StdRng>,
}

impl StatevectorSimulator {
    /// Create a simulator with default settings and an unseeded RNG.
    pub fn new() -> Self {
        Self {
            config: BackendConfig::new("statevector"),
            max_qubits: DEFAULT_MAX_QUBITS,
            usage: UsageCounters::new(),
            cache: Arc::new(TermCache::new()),
            importer: Arc::new(OpenFermionImporter),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Make sampling reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    #[must_use]
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Use a shared translation cache.
    #[must_use]
    pub fn with_cache(mut self, cache: Arc<TermCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Replace the interchange-text importer.
    #[must_use]
    pub fn with_importer(mut self, importer: Arc<dyn ObservableImporter>) -> Self {
        self.importer = importer;
        self
    }

    pub fn max_qubits(&self) -> u32 {
        self.max_qubits
    }

    pub fn cache(&self) -> &Arc<TermCache> {
        &self.cache
    }

    /// Build the final engine state of `circuit`.
    ///
    /// `initial_state` is in framework bit order; `None` means `|0…0⟩`.
    fn build_state(
        &self,
        circuit: &Circuit,
        initial_state: Option<&[Complex64]>,
    ) -> AdapterResult<QuantumState> {
        let num_qubits = circuit.num_qubits();
        if num_qubits > self.max_qubits as usize {
            return Err(AdapterError::TooManyQubits {
                num_qubits,
                max_qubits: self.max_qubits,
            });
        }

        let flipped = match initial_state {
            Some(amplitudes) => flip_amplitudes(amplitudes)?,
            None => Wavefunction::zero_state(num_qubits)?.into_amplitudes(),
        };

        let mut state = QuantumState::new(num_qubits);
        state.load(&flipped)?;

        let native = convert_to_native(circuit)?;
        debug!(
            "Applying {} native gates to {} qubits",
            native.gate_count(),
            num_qubits
        );
        native.update_quantum_state(&mut state)?;
        Ok(state)
    }
}

impl Default for StatevectorSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl QuantumSimulator for StatevectorSimulator {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn usage(&self) -> &UsageCounters {
        &self.usage
    }

    fn qubit_limit(&self) -> Option<usize> {
        Some(self.max_qubits as usize)
    }

    #[instrument(skip(self, circuit))]
    fn run_circuit_and_measure(
        &self,
        circuit: &Circuit,
        n_samples: usize,
    ) -> HalResult<Measurements> {
        let start = Instant::now();
        let wavefunction = self.get_wavefunction(circuit, None)?;

        let bitstrings = {
            let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
            sample_from_wavefunction(&wavefunction, n_samples, &mut *rng)?
        };

        debug!("Sampled {} shots in {:?}", bitstrings.len(), start.elapsed());
        Ok(Measurements::new(bitstrings))
    }

    #[instrument(skip(self, circuit, operator), fields(terms = operator.n_terms()))]
    fn get_exact_expectation_values(
        &self,
        circuit: &Circuit,
        operator: &PauliSum,
    ) -> HalResult<ExpectationValues> {
        self.usage.record_job(1);

        let state = self.build_state(circuit, None)?;
        let terms = self
            .cache
            .get_or_translate(operator, self.importer.as_ref())?;

        let values = terms
            .iter()
            .map(|term| term.expectation_value(&state).map(|v| v.re))
            .collect::<Result<Vec<f64>, _>>()
            .map_err(AdapterError::from)?;
        Ok(ExpectationValues::new(values))
    }

    fn wavefunction_from_native_circuit(
        &self,
        circuit: &Circuit,
        initial_state: &Wavefunction,
    ) -> HalResult<Wavefunction> {
        let state = self.build_state(circuit, Some(initial_state.amplitudes()))?;
        Ok(Wavefunction::new(flip_amplitudes(state.amplitudes())?)?)
    }

    fn can_be_executed_natively(&self, instruction: &Instruction) -> bool {
        is_native_instruction(instruction)
    }
}

impl BackendFactory for StatevectorSimulator {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let max_qubits = match config.extra_u64("max_qubits")? {
            Some(v) => u32::try_from(v).map_err(|_| {
                HalError::Configuration(format!("max_qubits {v} does not fit in u32"))
            })?,
            None => DEFAULT_MAX_QUBITS,
        };
        let seed = config.extra_u64("seed")?;

        let mut simulator = Self::new().with_max_qubits(max_qubits);
        if let Some(seed) = seed {
            simulator = simulator.with_seed(seed);
        }
        simulator.config = config;
        Ok(simulator)
    }
}
