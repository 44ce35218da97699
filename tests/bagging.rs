//! Integration tests for bag and bag-set construction.

mod common;

use boosting_bags::*;
use common::*;
use std::sync::Arc;

#[test]
fn test_scripted_bootstrap_scenario() {
    let mut rng = ScriptedRng::new(&[2, 2, 0, 3]);
    let bag = BagFactory::new().bootstrap(&mut rng, 4, None).unwrap();

    assert_eq!(bag.occurrences(), &[1, 0, 2, 1]);
    assert_eq!(bag.weights(), &[1.0, 0.0, 2.0, 1.0]);
    assert_eq!(bag.weight_total(), 4.0);
    assert_eq!(bag.out_of_bag_count(), 1);
    assert_eq!(rng.consumed(), 4);
}

#[test]
fn test_zero_external_weight_alongside_positive() {
    let weights = create_weights_with_zeros(200, 17);
    let factory = BagFactory::new();

    let flat = factory.flat(weights.len(), Some(&weights[..])).unwrap();
    assert!(flat.weight_total().is_finite());
    assert!(flat.weight_total() > 0.0);
    assert_eq!(flat.weights(), &weights[..]);

    let mut rng = Random::with_seed(17);
    let bag = factory
        .bootstrap(&mut rng, weights.len(), Some(&weights[..]))
        .unwrap();
    assert!(bag.weight_total().is_finite());
    assert!(bag.weight_total() > 0.0);
    for ((count, weight), external) in bag.iter().zip(&weights) {
        assert_eq!(weight, count as Weight * external);
    }
}

#[test]
fn test_invalid_external_weights_fail() {
    let factory = BagFactory::new();
    let cases: Vec<Vec<Weight>> = vec![
        vec![0.0; 10],
        {
            let mut w = create_positive_weights(10, 1);
            w[4] = Weight::NAN;
            w
        },
        {
            let mut w = create_positive_weights(10, 2);
            w[0] = Weight::INFINITY;
            w
        },
        vec![-1.0; 10],
    ];

    for weights in &cases {
        assert!(matches!(
            factory.flat(10, Some(&weights[..])),
            Err(BaggingError::InvalidAggregateWeight { .. })
        ));

        let mut rng = Random::with_seed(5);
        assert!(matches!(
            factory.bootstrap(&mut rng, 10, Some(&weights[..])),
            Err(BaggingError::InvalidAggregateWeight { .. })
        ));
    }
}

#[test]
fn test_disabled_bagging_matches_flat_bag() {
    let weights = create_positive_weights(50, 3);
    let factory = BagFactory::new();
    let mut rng = Random::with_seed(3);

    let set = factory.bag_set(&mut rng, 50, Some(&weights[..]), 0).unwrap();
    let direct = factory.flat(50, Some(&weights[..])).unwrap();

    assert_eq!(set.len(), 1);
    assert_eq!(set.requested_bag_count(), 0);
    assert_bags_equal(set.get(0).unwrap(), &direct);
}

#[test]
fn test_bag_set_length_and_order() {
    let mut rng = Random::with_seed(21);
    let set = BagSet::construct(&mut rng, 64, None, 5).unwrap();
    assert_eq!(set.len(), 5);
    assert_eq!(set.populated_count(), 5);

    let factory = BagFactory::new();
    let mut replay = Random::with_seed(21);
    for (index, bag) in set.iter().enumerate() {
        let expected = factory.bootstrap(&mut replay, 64, None).unwrap();
        assert_bags_equal(bag, &expected);
        assert!(std::ptr::eq(set.get(index).unwrap(), bag));
    }
    assert_eq!(rng, replay);
}

#[test]
fn test_failure_at_each_bag_index_leaks_nothing() {
    let sample_count = 32;
    let requested = 4;

    for failing_index in 0..requested {
        let budget = budget_failing_at_bag(failing_index, requested, sample_count);
        let factory = BagFactory::with_budget(Arc::clone(&budget));
        let mut rng = Random::with_seed(8);

        let result = factory.bag_set(&mut rng, sample_count, None, requested);
        assert!(
            matches!(result, Err(BaggingError::Memory { .. })),
            "bag {} should fail",
            failing_index
        );
        assert_eq!(budget.in_use(), 0, "bag {} leaked", failing_index);
        assert_eq!(
            budget.peak(),
            slot_bytes(requested)
                + failing_index * bag_bytes(sample_count)
                + sample_count * std::mem::size_of::<OccurrenceCount>()
        );
    }
}

#[test]
fn test_failure_after_budget_refill_succeeds() {
    let sample_count = 16;
    let budget = budget_failing_at_bag(1, 2, sample_count);
    let factory = BagFactory::with_budget(Arc::clone(&budget));
    let mut rng = Random::with_seed(8);
    assert!(factory.bag_set(&mut rng, sample_count, None, 2).is_err());

    let roomy = MemoryBudget::new(slot_bytes(2) + 2 * bag_bytes(sample_count));
    let factory = BagFactory::with_budget(Arc::clone(&roomy));
    let set = factory.bag_set(&mut rng, sample_count, None, 2).unwrap();
    assert_eq!(roomy.in_use(), roomy.limit());
    assert_eq!(set.release(), 2);
    assert_eq!(roomy.in_use(), 0);
}

#[test]
fn test_slot_sequence_budget_failure() {
    let budget = MemoryBudget::new(slot_bytes(3) - 1);
    let factory = BagFactory::with_budget(Arc::clone(&budget));
    let mut rng = Random::with_seed(1);
    let reference = rng.clone();

    let result = factory.bag_set(&mut rng, 8, None, 3);
    assert!(matches!(result, Err(BaggingError::Memory { .. })));
    assert_eq!(budget.in_use(), 0);
    assert_eq!(rng, reference);
}

#[test]
fn test_flat_failure_releases_slots() {
    let budget = MemoryBudget::unlimited();
    let factory = BagFactory::with_budget(Arc::clone(&budget));
    let mut rng = Random::with_seed(1);

    let result = factory.bag_set(&mut rng, 5, Some(&[0.0; 5][..]), 0);
    assert!(matches!(
        result,
        Err(BaggingError::InvalidAggregateWeight { .. })
    ));
    assert_eq!(budget.in_use(), 0);
    assert!(budget.peak() > 0);
}

#[test]
fn test_release_scans_single_slot_when_disabled() {
    let factory = BagFactory::new();
    let set = BagSet::from_slots(0, vec![Some(factory.flat(4, None).unwrap())]).unwrap();
    assert_eq!(set.len(), effective_bag_count(0));
    assert_eq!(release_bag_set(Some(set)), 1);

    assert!(BagSet::from_slots(0, Vec::new()).is_err());
    assert_eq!(release_bag_set(None), 0);
}

#[test]
fn test_release_skips_empty_slots() {
    let factory = BagFactory::new();
    let mut rng = Random::with_seed(4);
    let slots = vec![
        Some(factory.bootstrap(&mut rng, 6, None).unwrap()),
        None,
        Some(factory.bootstrap(&mut rng, 6, None).unwrap()),
    ];
    let set = BagSet::from_slots(3, slots).unwrap();
    assert_eq!(set.iter().count(), 2);
    assert_eq!(set.release(), 2);
}

#[test]
fn test_bags_do_not_alias_external_weights() {
    let mut weights = create_positive_weights(8, 9);
    let original = weights.clone();
    let factory = BagFactory::new();
    let flat = factory.flat(8, Some(&weights[..])).unwrap();

    weights.iter_mut().for_each(|w| *w = 0.0);
    assert_eq!(flat.weights(), &original[..]);
}

#[test]
fn test_independent_generators_across_threads() {
    let handles: Vec<_> = (0..4u64)
        .map(|seed| {
            std::thread::spawn(move || {
                let mut rng = Random::with_seed(seed);
                let set = BagSet::construct(&mut rng, 100, None, 3).unwrap();
                set.iter()
                    .map(|bag| bag.occurrences().to_vec())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for (seed, handle) in handles.into_iter().enumerate() {
        let counts = handle.join().unwrap();
        let mut rng = Random::with_seed(seed as u64);
        let replay = BagSet::construct(&mut rng, 100, None, 3).unwrap();
        for (bag, expected) in replay.iter().zip(&counts) {
            assert_eq!(bag.occurrences(), &expected[..]);
        }
    }
}

#[test]
fn test_config_file_drives_round() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("bagging.toml");
    std::fs::write(&path, "bag_count = 2\nbagging_seed = 11\n").unwrap();

    let config = BaggingConfig::load_from_file(&path).unwrap();
    let mut rng = config.create_rng();
    let set = config
        .create_factory()
        .bag_set(&mut rng, 12, None, config.bag_count)
        .unwrap();
    assert_eq!(set.len(), 2);

    let mut replay = Random::with_seed(11);
    let expected = BagSet::construct(&mut replay, 12, None, 2).unwrap();
    for (left, right) in set.iter().zip(&expected) {
        assert_bags_equal(left, right);
    }
}
