//! Property tests for bag construction.

use approx::assert_relative_eq;
use boosting_bags::*;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bootstrap_counts_and_total_equal_sample_count(
        sample_count in 1usize..2_000,
        seed in any::<u64>(),
    ) {
        let mut rng = Random::with_seed(seed);
        let bag = BagFactory::new().bootstrap(&mut rng, sample_count, None).unwrap();

        prop_assert_eq!(bag.kind(), BagKind::Bootstrap);
        prop_assert_eq!(bag.sample_count(), sample_count);
        prop_assert_eq!(bag.occurrences().iter().sum::<usize>(), sample_count);
        prop_assert_eq!(bag.weight_total(), sample_count as WeightTotal);
        for (count, weight) in bag.iter() {
            prop_assert_eq!(weight, count as Weight);
        }
    }

    #[test]
    fn flat_bag_is_identity(sample_count in 1usize..2_000) {
        let bag = BagFactory::new().flat(sample_count, None).unwrap();

        prop_assert_eq!(bag.kind(), BagKind::Flat);
        prop_assert!(bag.occurrences().iter().all(|&count| count == 1));
        prop_assert!(bag.weights().iter().all(|&weight| weight == 1.0));
        prop_assert_eq!(bag.weight_total(), sample_count as WeightTotal);
    }

    #[test]
    fn bootstrap_is_deterministic_for_a_seed(
        sample_count in 1usize..500,
        seed in any::<u64>(),
    ) {
        let factory = BagFactory::new();
        let mut rng = Random::with_seed(seed);
        let first = factory.bootstrap(&mut rng, sample_count, None).unwrap();
        rng.reset();
        let second = factory.bootstrap(&mut rng, sample_count, None).unwrap();

        prop_assert_eq!(first.occurrences(), second.occurrences());
    }

    #[test]
    fn weighted_bootstrap_total_matches_weights(
        weights in prop::collection::vec(0.01f32..100.0, 1..300),
        seed in any::<u64>(),
    ) {
        let mut rng = Random::with_seed(seed);
        let bag = BagFactory::new()
            .bootstrap(&mut rng, weights.len(), Some(&weights[..]))
            .unwrap();

        let mut expected = 0.0f64;
        for ((count, weight), &external) in bag.iter().zip(&weights) {
            prop_assert_eq!(weight, count as Weight * external);
            expected += weight as f64;
        }
        assert_relative_eq!(bag.weight_total(), expected, max_relative = 1e-9);
        prop_assert!(bag.weight_total() > 0.0);
    }

    #[test]
    fn bag_set_has_effective_length(requested in 0usize..6, sample_count in 1usize..50) {
        let mut rng = Random::with_seed(requested as u64);
        let set = BagSet::construct(&mut rng, sample_count, None, requested).unwrap();

        prop_assert_eq!(set.len(), effective_bag_count(requested));
        prop_assert_eq!(set.populated_count(), set.len());
        prop_assert_eq!(set.sample_count(), Some(sample_count));
        prop_assert_eq!(set.release(), effective_bag_count(requested));
    }
}
