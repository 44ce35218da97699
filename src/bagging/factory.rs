//! Bag construction: bootstrap resampling and flat (identity) bags.
//!
//! Both constructors either return a complete [`Bag`] or an error. Every
//! array is owned by an [`AlignedBuffer`] from the moment it is allocated, so
//! an early return releases whatever was already acquired for the bag.

use super::bag::{validate_weight_total, Bag};
use super::set::BagSet;
use crate::core::error::{BaggingError, MemoryError, Result};
use crate::core::memory::{AlignedBuffer, MemoryBudget};
use crate::core::types::{BagKind, OccurrenceCount, Weight, WeightTotal};
use crate::core::utils::common::Common;
use crate::core::utils::random::BootstrapRng;
use std::sync::Arc;

/// Builds bags, optionally charging their storage to a [`MemoryBudget`].
#[derive(Debug, Clone, Default)]
pub struct BagFactory {
    budget: Option<Arc<MemoryBudget>>,
}

impl BagFactory {
    /// Factory with no memory limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory whose bags and bag sets are charged to `budget`.
    pub fn with_budget(budget: Arc<MemoryBudget>) -> Self {
        BagFactory {
            budget: Some(budget),
        }
    }

    /// Budget bag storage is charged to, if any.
    pub fn budget(&self) -> Option<&Arc<MemoryBudget>> {
        self.budget.as_ref()
    }

    /// Build one bootstrap bag by sampling `sample_count` indices with replacement.
    ///
    /// The generator is borrowed exclusively for the sampling loop and left
    /// advanced by exactly `sample_count` draws. With no external weights each
    /// sample's weight is its occurrence count and the total is exactly
    /// `sample_count`. With external weights, weight `i` is
    /// `occurrences[i] * external[i]` and the total is their safe sum, which
    /// must be finite and positive.
    ///
    /// # Panics
    ///
    /// Panics if `sample_count` is zero.
    pub fn bootstrap<R>(
        &self,
        rng: &mut R,
        sample_count: usize,
        external_weights: Option<&[Weight]>,
    ) -> Result<Bag>
    where
        R: BootstrapRng + ?Sized,
    {
        log::trace!("Entered BagFactory::bootstrap (sample_count = {})", sample_count);

        crate::check!(sample_count >= 1, "a bag needs at least one sample");
        check_external_weights(sample_count, external_weights)?;

        let budget = self.budget.as_ref();
        let mut occurrences = AlignedBuffer::<OccurrenceCount>::filled(sample_count, 0, budget)
            .map_err(|err| allocation_failure("bootstrap occurrence counts", err))?;
        let mut weights = AlignedBuffer::<Weight>::filled(sample_count, 0.0, budget)
            .map_err(|err| allocation_failure("bootstrap weights", err))?;

        for _ in 0..sample_count {
            let index = rng.next_index(sample_count);
            occurrences[index] += 1;
        }

        let weight_total = match external_weights {
            None => {
                for (weight, &count) in weights.iter_mut().zip(occurrences.iter()) {
                    *weight = count as Weight;
                }
                let total = sample_count as WeightTotal;
                #[cfg(debug_assertions)]
                {
                    use crate::core::constants::DEBUG_TOTAL_TOLERANCE;
                    let debug_total = Common::add_positive_floats_safe(weights.as_slice());
                    debug_assert!(
                        Common::within_relative_tolerance(total, debug_total, DEBUG_TOTAL_TOLERANCE),
                        "bootstrap total {} disagrees with summed weights {}",
                        total,
                        debug_total
                    );
                }
                total
            }
            Some(external) => {
                for ((weight, &count), &scale) in
                    weights.iter_mut().zip(occurrences.iter()).zip(external)
                {
                    *weight = count as Weight * scale;
                }
                validate_weight_total(
                    Common::add_positive_floats_safe(weights.as_slice()),
                    "BagFactory::bootstrap",
                )?
            }
        };

        log::trace!("Exited BagFactory::bootstrap");
        Ok(Bag::from_parts(
            BagKind::Bootstrap,
            occurrences,
            weights,
            weight_total,
        ))
    }

    /// Build a flat bag: every sample exactly once, bagging disabled.
    ///
    /// Weights are copied from `external_weights` when given (their safe sum
    /// must be finite and positive), otherwise every weight is 1 and the total
    /// is exactly `sample_count`.
    ///
    /// # Panics
    ///
    /// Panics if `sample_count` is zero.
    pub fn flat(&self, sample_count: usize, external_weights: Option<&[Weight]>) -> Result<Bag> {
        log::trace!("Entered BagFactory::flat (sample_count = {})", sample_count);

        crate::check!(sample_count >= 1, "a bag needs at least one sample");
        check_external_weights(sample_count, external_weights)?;

        let budget = self.budget.as_ref();
        let occurrences = AlignedBuffer::<OccurrenceCount>::filled(sample_count, 1, budget)
            .map_err(|err| allocation_failure("flat occurrence counts", err))?;

        let (weights, weight_total) = match external_weights {
            None => {
                let weights = AlignedBuffer::<Weight>::filled(sample_count, 1.0, budget)
                    .map_err(|err| allocation_failure("flat weights", err))?;
                (weights, sample_count as WeightTotal)
            }
            Some(external) => {
                let weights = AlignedBuffer::from_slice(external, budget)
                    .map_err(|err| allocation_failure("flat weights", err))?;
                let total = validate_weight_total(
                    Common::add_positive_floats_safe(external),
                    "BagFactory::flat",
                )?;
                (weights, total)
            }
        };

        log::trace!("Exited BagFactory::flat");
        Ok(Bag::from_parts(BagKind::Flat, occurrences, weights, weight_total))
    }

    /// Build a bag set of `requested_bag_count` bootstrap bags, or a single
    /// flat bag when `requested_bag_count` is 0. See [`BagSet`].
    pub fn bag_set<R>(
        &self,
        rng: &mut R,
        sample_count: usize,
        external_weights: Option<&[Weight]>,
        requested_bag_count: usize,
    ) -> Result<BagSet>
    where
        R: BootstrapRng + ?Sized,
    {
        BagSet::construct_with(self, rng, sample_count, external_weights, requested_bag_count)
    }
}

fn check_external_weights(sample_count: usize, external_weights: Option<&[Weight]>) -> Result<()> {
    match external_weights {
        Some(external) if external.len() != sample_count => {
            log::warn!(
                "External weights cover {} samples but the bag has {}",
                external.len(),
                sample_count
            );
            Err(BaggingError::dimension_mismatch(
                format!("{} weights", sample_count),
                format!("{} weights", external.len()),
            ))
        }
        _ => Ok(()),
    }
}

fn allocation_failure(what: &str, err: MemoryError) -> BaggingError {
    log::warn!("Allocating {} failed: {}", what, err);
    err.into()
}
