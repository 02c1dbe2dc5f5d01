//! Native quantum state and gate kernels.
//!
//! Basis indices are little-endian: qubit `q` is bit `1 << q`.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{EngineError, EngineResult};

/// A 2×2 single-qubit matrix, row-major.
pub type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Dense state vector of `2^n` amplitudes.
#[derive(Debug, Clone)]
pub struct QuantumState {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl QuantumState {
    /// Create a new state initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes, `2^num_qubits`.
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Overwrite the amplitudes with `vector`, engine bit order.
    pub fn load(&mut self, vector: &[Complex64]) -> EngineResult<()> {
        if vector.len() != self.dim() {
            return Err(EngineError::DimensionMismatch {
                expected: self.dim(),
                got: vector.len(),
            });
        }
        self.amplitudes.copy_from_slice(vector);
        Ok(())
    }

    /// Reset to |0...0⟩.
    pub fn set_zero_state(&mut self) {
        self.amplitudes.fill(ZERO);
        self.amplitudes[0] = ONE;
    }

    /// Copy of the amplitudes, engine bit order.
    pub fn get_vector(&self) -> Vec<Complex64> {
        self.amplitudes.clone()
    }

    /// Borrow the amplitudes, engine bit order.
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Squared norm of the state; 1 for a normalized state.
    pub fn norm_squared(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    pub(crate) fn check_qubit(&self, qubit: usize) -> EngineResult<()> {
        if qubit >= self.num_qubits {
            return Err(EngineError::QubitOutOfRange {
                qubit,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Single-qubit kernels
    // =========================================================================

    pub(crate) fn apply_x(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.dim() {
            if i & mask == 0 {
                self.amplitudes.swap(i, i | mask);
            }
        }
    }

    pub(crate) fn apply_y(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.dim() {
            if i & mask == 0 {
                let j = i | mask;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = -I * self.amplitudes[j];
                self.amplitudes[j] = I * tmp;
            }
        }
    }

    pub(crate) fn apply_z(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp = -*amp;
            }
        }
    }

    pub(crate) fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = std::f64::consts::FRAC_1_SQRT_2;
        for i in 0..self.dim() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    /// diag(1, e^{iθ}) on `qubit`.
    pub(crate) fn apply_phase(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase = Complex64::from_polar(1.0, theta);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask != 0 {
                *amp *= phase;
            }
        }
    }

    pub(crate) fn apply_rz(&mut self, qubit: usize, theta: f64) {
        let mask = 1 << qubit;
        let phase_0 = Complex64::from_polar(1.0, -theta / 2.0);
        let phase_1 = Complex64::from_polar(1.0, theta / 2.0);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & mask == 0 {
                *amp *= phase_0;
            } else {
                *amp *= phase_1;
            }
        }
    }

    /// Apply a 2×2 matrix to `target` on every basis state whose bits in
    /// `control_mask` are all set. A zero mask applies it unconditionally.
    pub(crate) fn apply_matrix2(&mut self, target: usize, control_mask: usize, m: &Matrix2) {
        let mask = 1 << target;
        for i in 0..self.dim() {
            if i & mask == 0 && i & control_mask == control_mask {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    // =========================================================================
    // Multi-qubit kernels
    // =========================================================================

    pub(crate) fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.dim() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    pub(crate) fn apply_cz(&mut self, control: usize, target: usize) {
        let both = (1 << control) | (1 << target);
        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if i & both == both {
                *amp = -*amp;
            }
        }
    }

    pub(crate) fn apply_swap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.dim() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    pub(crate) fn apply_iswap(&mut self, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.dim() {
            if (i & mask1 != 0) && (i & mask2 == 0) {
                let j = (i & !mask1) | mask2;
                let tmp = self.amplitudes[i];
                self.amplitudes[i] = I * self.amplitudes[j];
                self.amplitudes[j] = I * tmp;
            }
        }
    }

    pub(crate) fn apply_ccx(&mut self, c1: usize, c2: usize, target: usize) {
        let ctrl = (1 << c1) | (1 << c2);
        let tgt_mask = 1 << target;
        for i in 0..self.dim() {
            if (i & ctrl == ctrl) && (i & tgt_mask == 0) {
                self.amplitudes.swap(i, i | tgt_mask);
            }
        }
    }

    pub(crate) fn apply_cswap(&mut self, control: usize, t1: usize, t2: usize) {
        let ctrl_mask = 1 << control;
        let t1_mask = 1 << t1;
        let t2_mask = 1 << t2;
        for i in 0..self.dim() {
            if (i & ctrl_mask != 0) && (i & t1_mask != 0) && (i & t2_mask == 0) {
                let j = (i & !t1_mask) | t2_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Apply `matrix` to `targets`; bit `k` of the matrix index is `targets[k]`.
    pub(crate) fn apply_dense(&mut self, targets: &[usize], matrix: &Array2<Complex64>) {
        let k = targets.len();
        let sub_dim = 1 << k;
        let target_mask: usize = targets.iter().map(|&t| 1usize << t).sum();
        let offsets: Vec<usize> = (0..sub_dim)
            .map(|m| {
                targets
                    .iter()
                    .enumerate()
                    .filter(|(bit, _)| (m >> bit) & 1 == 1)
                    .map(|(_, &t)| 1usize << t)
                    .sum()
            })
            .collect();

        let mut gathered = vec![ZERO; sub_dim];
        for base in 0..self.dim() {
            if base & target_mask != 0 {
                continue;
            }
            for (slot, offset) in gathered.iter_mut().zip(&offsets) {
                *slot = self.amplitudes[base | offset];
            }
            for (row, offset) in offsets.iter().enumerate() {
                self.amplitudes[base | offset] = gathered
                    .iter()
                    .enumerate()
                    .map(|(col, v)| matrix[[row, col]] * v)
                    .sum();
            }
        }
    }

    // =========================================================================
    // Pauli strings
    // =========================================================================

    /// `exp(-iθ/2 · P)` for the Pauli string described by `pauli`.
    pub(crate) fn apply_pauli_rotation(&mut self, pauli: &PauliMasks, theta: f64) {
        let c = (theta / 2.0).cos();
        let s = Complex64::new(0.0, -(theta / 2.0).sin());
        let applied = pauli.apply(&self.amplitudes);
        for (amp, p_amp) in self.amplitudes.iter_mut().zip(applied) {
            *amp = c * *amp + s * p_amp;
        }
    }

    /// ⟨ψ|P|ψ⟩ for the Pauli string described by `pauli`.
    pub(crate) fn pauli_expectation(&self, pauli: &PauliMasks) -> Complex64 {
        self.amplitudes
            .iter()
            .enumerate()
            .map(|(b, amp)| self.amplitudes[b ^ pauli.x_mask].conj() * pauli.phase(b) * amp)
            .sum()
    }
}

/// Bit-mask form of a Pauli string.
///
/// `P|b⟩ = i^{num_y} · (-1)^{popcount(b & z_mask)} · |b ⊕ x_mask⟩`, with Y
/// contributing to both masks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct PauliMasks {
    pub(crate) x_mask: usize,
    pub(crate) z_mask: usize,
    pub(crate) num_y: u32,
}

impl PauliMasks {
    fn phase(&self, b: usize) -> Complex64 {
        let global = match self.num_y % 4 {
            0 => ONE,
            1 => I,
            2 => -ONE,
            _ => -I,
        };
        if (b & self.z_mask).count_ones() % 2 == 1 {
            -global
        } else {
            global
        }
    }

    fn apply(&self, amplitudes: &[Complex64]) -> Vec<Complex64> {
        let mut out = vec![ZERO; amplitudes.len()];
        for (b, amp) in amplitudes.iter().enumerate() {
            out[b ^ self.x_mask] = self.phase(b) * amp;
        }
        out
    }
}
