//! Simulation results.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use qbridge_ir::Bitstring;

/// Sampled bitstrings, one per shot.
///
/// Bit `i` of each sample is qubit `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurements {
    bitstrings: Vec<Bitstring>,
}

impl Measurements {
    /// Wrap a list of samples.
    pub fn new(bitstrings: Vec<Bitstring>) -> Self {
        Self { bitstrings }
    }

    pub fn bitstrings(&self) -> &[Bitstring] {
        &self.bitstrings
    }

    pub fn into_bitstrings(self) -> Vec<Bitstring> {
        self.bitstrings
    }

    /// Number of shots.
    pub fn len(&self) -> usize {
        self.bitstrings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bitstrings.is_empty()
    }

    /// Histogram keyed by the sample written as `0`/`1` characters, qubit 0 first.
    pub fn get_counts(&self) -> FxHashMap<String, u64> {
        let mut counts = FxHashMap::default();
        for bits in &self.bitstrings {
            let key: String = bits.iter().map(|&b| if b == 0 { '0' } else { '1' }).collect();
            *counts.entry(key).or_insert(0) += 1;
        }
        counts
    }

    /// The most frequent outcome and its count, ties broken by the smaller key.
    pub fn most_frequent(&self) -> Option<(String, u64)> {
        self.get_counts()
            .into_iter()
            .max_by(|(ka, ca), (kb, cb)| ca.cmp(cb).then_with(|| kb.cmp(ka)))
    }
}

impl From<Vec<Bitstring>> for Measurements {
    fn from(bitstrings: Vec<Bitstring>) -> Self {
        Self::new(bitstrings)
    }
}

/// Real expectation values, one per operator term, in term order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpectationValues {
    values: Vec<f64>,
}

impl ExpectationValues {
    pub fn new(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Sum over the terms, i.e. the expectation of the whole operator.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

impl From<Vec<f64>> for ExpectationValues {
    fn from(values: Vec<f64>) -> Self {
        Self::new(values)
    }
}
