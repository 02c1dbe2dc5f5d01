//! Property tests for measurement results.

use proptest::prelude::*;
use qbridge_hal::Measurements;

fn samples() -> impl Strategy<Value = Vec<Vec<u8>>> {
    (1usize..6).prop_flat_map(|width| {
        prop::collection::vec(prop::collection::vec(0u8..=1, width), 0..64)
    })
}

proptest! {
    #[test]
    fn counts_cover_every_shot(bitstrings in samples()) {
        let m = Measurements::new(bitstrings.clone());
        let counts = m.get_counts();
        prop_assert_eq!(counts.values().sum::<u64>(), bitstrings.len() as u64);
        for key in counts.keys() {
            prop_assert_eq!(key.len(), bitstrings[0].len());
        }
    }

    #[test]
    fn most_frequent_has_max_count(bitstrings in samples()) {
        let m = Measurements::new(bitstrings);
        let counts = m.get_counts();
        match m.most_frequent() {
            Some((key, count)) => {
                prop_assert_eq!(counts.get(&key), Some(&count));
                prop_assert!(counts.values().all(|&c| c <= count));
            }
            None => prop_assert!(m.is_empty()),
        }
    }
}
