//! Wavefunctions and the utilities simulators use at the framework boundary.
//!
//! Basis indices are big-endian: qubit 0 is the most significant bit, so the
//! amplitude of `|q0 q1 … q(n-1)⟩` lives at index `q0·2^(n-1) + … + q(n-1)`.
//! Engines that use the opposite convention convert with
//! [`flip_amplitudes`] on the way in and on the way out.

use num_complex::Complex64;
use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{IrError, IrResult};

/// One measurement outcome; entry `i` is the bit read from qubit `i`.
pub type Bitstring = Vec<u8>;

/// A dense state vector of length `2^n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Complex64>", into = "Vec<Complex64>")]
pub struct Wavefunction {
    amplitudes: Vec<Complex64>,
}

impl Wavefunction {
    /// Wrap an amplitude vector.
    ///
    /// The length must be a non-zero power of two. Normalisation is not
    /// checked.
    pub fn new(amplitudes: Vec<Complex64>) -> IrResult<Self> {
        num_qubits_for(amplitudes.len())?;
        Ok(Self { amplitudes })
    }

    /// The all-zero computational basis state `|0…0⟩`.
    ///
    /// Fails when `2^num_qubits` does not fit in `usize`.
    pub fn zero_state(num_qubits: usize) -> IrResult<Self> {
        let dim = u32::try_from(num_qubits)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .ok_or_else(|| {
                IrError::InvalidWavefunction(format!(
                    "{num_qubits} qubits do not fit in a state vector"
                ))
            })?;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dim];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Ok(Self { amplitudes })
    }

    /// Number of qubits described by this state.
    pub fn num_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    /// The amplitudes, framework bit order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Consume the wavefunction and return its amplitudes.
    pub fn into_amplitudes(self) -> Vec<Complex64> {
        self.amplitudes
    }

    /// Born-rule probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Probability of every outcome, keyed by bitstring (qubit 0 first).
    pub fn get_outcome_probs(&self) -> BTreeMap<String, f64> {
        let n = self.num_qubits();
        self.probabilities()
            .into_iter()
            .enumerate()
            .map(|(index, p)| (index_to_string(index, n), p))
            .collect()
    }
}

impl TryFrom<Vec<Complex64>> for Wavefunction {
    type Error = IrError;

    fn try_from(amplitudes: Vec<Complex64>) -> IrResult<Self> {
        Self::new(amplitudes)
    }
}

impl From<Wavefunction> for Vec<Complex64> {
    fn from(wavefunction: Wavefunction) -> Self {
        wavefunction.amplitudes
    }
}

/// Number of qubits for a vector of `len` amplitudes.
fn num_qubits_for(len: usize) -> IrResult<usize> {
    if len == 0 || !len.is_power_of_two() {
        return Err(IrError::InvalidWavefunction(format!(
            "amplitude count {len} is not a power of two"
        )));
    }
    Ok(len.trailing_zeros() as usize)
}

/// Reverse the `num_qubits` low bits of `index`.
#[inline]
fn reverse_index(index: usize, num_qubits: usize) -> usize {
    if num_qubits == 0 {
        return 0;
    }
    index.reverse_bits() >> (usize::BITS as usize - num_qubits)
}

fn index_to_string(index: usize, num_qubits: usize) -> String {
    (0..num_qubits)
        .map(|q| if (index >> (num_qubits - 1 - q)) & 1 == 1 { '1' } else { '0' })
        .collect()
}

/// Re-index amplitudes between big-endian and little-endian qubit order.
///
/// The amplitude at index `i` moves to the index whose bits are those of `i`
/// reversed. Applying it twice returns the input.
pub fn flip_amplitudes(amplitudes: &[Complex64]) -> IrResult<Vec<Complex64>> {
    let num_qubits = num_qubits_for(amplitudes.len())?;
    let mut flipped = vec![Complex64::new(0.0, 0.0); amplitudes.len()];
    for (index, amp) in amplitudes.iter().enumerate() {
        flipped[reverse_index(index, num_qubits)] = *amp;
    }
    Ok(flipped)
}

/// Draw `n_samples` bitstrings from `|amplitude|²`.
///
/// Zero samples yields an empty vector. A state with no probability mass
/// cannot be sampled.
pub fn sample_from_wavefunction<R: Rng + ?Sized>(
    wavefunction: &Wavefunction,
    n_samples: usize,
    rng: &mut R,
) -> IrResult<Vec<Bitstring>> {
    if n_samples == 0 {
        return Ok(vec![]);
    }

    let n = wavefunction.num_qubits();
    let dist = WeightedIndex::new(wavefunction.probabilities())
        .map_err(|e| IrError::InvalidWavefunction(format!("cannot sample: {e}")))?;

    Ok((0..n_samples)
        .map(|_| {
            let index = dist.sample(rng);
            (0..n).map(|q| ((index >> (n - 1 - q)) & 1) as u8).collect()
        })
        .collect())
}
