//! Common test utilities for bag generation integration tests.

#![allow(dead_code)]

use boosting_bags::*;
use rand::prelude::*;
use std::mem::size_of;
use std::sync::Arc;

/// Generator replaying a fixed list of indices.
#[derive(Debug)]
pub struct ScriptedRng {
    draws: Vec<usize>,
    position: usize,
}

impl ScriptedRng {
    pub fn new(draws: &[usize]) -> Self {
        ScriptedRng {
            draws: draws.to_vec(),
            position: 0,
        }
    }

    /// Number of indices handed out so far.
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl BootstrapRng for ScriptedRng {
    fn next_index(&mut self, bound: usize) -> usize {
        let index = self.draws[self.position % self.draws.len()];
        self.position += 1;
        assert!(index < bound, "scripted index {} out of range {}", index, bound);
        index
    }
}

/// Strictly positive weights in `[0.1, 10.0)`.
pub fn create_positive_weights(sample_count: usize, seed: u64) -> Vec<Weight> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..sample_count).map(|_| rng.gen_range(0.1..10.0)).collect()
}

/// Positive weights with every third entry zeroed.
pub fn create_weights_with_zeros(sample_count: usize, seed: u64) -> Vec<Weight> {
    let mut weights = create_positive_weights(sample_count, seed);
    for weight in weights.iter_mut().step_by(3) {
        *weight = 0.0;
    }
    weights
}

/// Bytes charged to a budget by one bag over `sample_count` samples.
pub fn bag_bytes(sample_count: usize) -> usize {
    sample_count * (size_of::<OccurrenceCount>() + size_of::<Weight>())
}

/// Bytes charged to a budget by the slot sequence of a set.
pub fn slot_bytes(requested_bag_count: usize) -> usize {
    effective_bag_count(requested_bag_count) * size_of::<Option<Bag>>()
}

/// Budget that admits the slot sequence and `built` whole bags, then runs out
/// while bag `built` allocates its weight array.
pub fn budget_failing_at_bag(
    built: usize,
    requested_bag_count: usize,
    sample_count: usize,
) -> Arc<MemoryBudget> {
    MemoryBudget::new(
        slot_bytes(requested_bag_count)
            + built * bag_bytes(sample_count)
            + sample_count * size_of::<OccurrenceCount>(),
    )
}

/// Assert two bags hold identical arrays and totals.
pub fn assert_bags_equal(left: &Bag, right: &Bag) {
    assert_eq!(left.kind(), right.kind());
    assert_eq!(left.occurrences(), right.occurrences());
    assert_eq!(left.weights(), right.weights());
    assert_eq!(left.weight_total(), right.weight_total());
}
