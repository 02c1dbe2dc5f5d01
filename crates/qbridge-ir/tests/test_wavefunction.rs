//! Property tests for the wavefunction boundary utilities.

use num_complex::Complex64;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use qbridge_ir::{Wavefunction, flip_amplitudes, sample_from_wavefunction};

fn amplitudes() -> impl Strategy<Value = Vec<Complex64>> {
    (0usize..=6).prop_flat_map(|n| {
        prop::collection::vec((-1.0f64..1.0, -1.0f64..1.0), 1 << n)
            .prop_map(|pairs| pairs.into_iter().map(|(re, im)| Complex64::new(re, im)).collect())
    })
}

proptest! {
    #[test]
    fn flip_is_involutive(v in amplitudes()) {
        let twice = flip_amplitudes(&flip_amplitudes(&v).unwrap()).unwrap();
        prop_assert_eq!(twice, v);
    }

    #[test]
    fn flip_preserves_the_multiset_of_amplitudes(v in amplitudes()) {
        let flipped = flip_amplitudes(&v).unwrap();
        let norm = |xs: &[Complex64]| xs.iter().map(Complex64::norm_sqr).sum::<f64>();
        prop_assert!((norm(&flipped) - norm(&v)).abs() < 1e-9);
        prop_assert_eq!(flipped[0], v[0]);
        prop_assert_eq!(flipped[v.len() - 1], v[v.len() - 1]);
    }

    #[test]
    fn zero_state_is_flip_invariant(n in 0usize..8) {
        let wf = Wavefunction::zero_state(n).unwrap();
        let flipped = flip_amplitudes(wf.amplitudes()).unwrap();
        prop_assert_eq!(flipped.as_slice(), wf.amplitudes());
    }

    #[test]
    fn samples_have_requested_shape(n in 1usize..6, shots in 0usize..64, seed in any::<u64>()) {
        let wf = Wavefunction::zero_state(n).unwrap();
        let mut rng = StdRng::seed_from_u64(seed);
        let samples = sample_from_wavefunction(&wf, shots, &mut rng).unwrap();
        prop_assert_eq!(samples.len(), shots);
        prop_assert!(samples.iter().all(|b| b.len() == n && b.iter().all(|&bit| bit == 0)));
    }
}

#[test]
fn sampling_follows_born_rule() {
    // |ψ⟩ = √0.2 |0⟩ + √0.8 |1⟩
    let wf = Wavefunction::new(vec![
        Complex64::new(0.2f64.sqrt(), 0.0),
        Complex64::new(0.0, 0.8f64.sqrt()),
    ])
    .unwrap();
    let mut rng = StdRng::seed_from_u64(2024);
    let samples = sample_from_wavefunction(&wf, 20_000, &mut rng).unwrap();
    let ones = samples.iter().filter(|b| b[0] == 1).count() as f64 / 20_000.0;
    assert!((ones - 0.8).abs() < 0.02, "observed frequency {ones}");
}
