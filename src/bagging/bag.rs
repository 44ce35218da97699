//! The bag entity: one resampled, weighted view of the training set.

use crate::core::error::{BaggingError, Result};
use crate::core::memory::AlignedBuffer;
use crate::core::types::{BagKind, OccurrenceCount, Weight, WeightTotal};
use crate::core::utils::common::Common;
use ndarray::ArrayView1;

/// One resampled view over `sample_count` training samples.
///
/// Holds, per sample, how many times it participates in this bag and its
/// effective training weight, plus the high-precision sum of those weights.
/// A `Bag` only exists fully built: its total is always finite and strictly
/// positive, and both arrays are owned exclusively by the bag.
#[derive(Debug)]
pub struct Bag {
    kind: BagKind,
    occurrences: AlignedBuffer<OccurrenceCount>,
    weights: AlignedBuffer<Weight>,
    weight_total: WeightTotal,
}

impl Bag {
    pub(crate) fn from_parts(
        kind: BagKind,
        occurrences: AlignedBuffer<OccurrenceCount>,
        weights: AlignedBuffer<Weight>,
        weight_total: WeightTotal,
    ) -> Self {
        debug_assert_eq!(occurrences.len(), weights.len());
        debug_assert!(Common::is_valid_weight_total(weight_total));
        Bag {
            kind,
            occurrences,
            weights,
            weight_total,
        }
    }

    /// How the occurrence counts were produced.
    pub fn kind(&self) -> BagKind {
        self.kind
    }

    /// Number of training samples this bag covers.
    pub fn sample_count(&self) -> usize {
        self.occurrences.len()
    }

    /// Per-sample occurrence counts.
    pub fn occurrences(&self) -> &[OccurrenceCount] {
        &self.occurrences
    }

    /// Per-sample effective weights.
    pub fn weights(&self) -> &[Weight] {
        &self.weights
    }

    /// Sum of [`Bag::weights`], finite and strictly positive.
    pub fn weight_total(&self) -> WeightTotal {
        self.weight_total
    }

    /// Occurrence counts as an ndarray view.
    pub fn occurrences_view(&self) -> ArrayView1<'_, OccurrenceCount> {
        ArrayView1::from(self.occurrences())
    }

    /// Weights as an ndarray view.
    pub fn weights_view(&self) -> ArrayView1<'_, Weight> {
        ArrayView1::from(self.weights())
    }

    /// Iterate `(occurrence_count, weight)` pairs in sample order.
    pub fn iter(&self) -> impl Iterator<Item = (OccurrenceCount, Weight)> + '_ {
        self.occurrences
            .iter()
            .copied()
            .zip(self.weights.iter().copied())
    }

    /// Number of samples left out of this bag (zero occurrences).
    pub fn out_of_bag_count(&self) -> usize {
        self.occurrences.iter().filter(|&&count| count == 0).count()
    }

    /// Bytes held by the bag's arrays.
    pub fn memory_bytes(&self) -> usize {
        self.occurrences.allocated_bytes() + self.weights.allocated_bytes()
    }

    /// Release the bag and everything it owns.
    pub fn release(self) {
        log::trace!(
            "Releasing {} bag over {} samples",
            self.kind,
            self.sample_count()
        );
    }
}

/// Accepts `total` as a bag's aggregate weight or reports why it cannot be.
pub(crate) fn validate_weight_total(total: WeightTotal, context: &str) -> Result<WeightTotal> {
    if Common::is_valid_weight_total(total) {
        Ok(total)
    } else {
        log::warn!(
            "{}: aggregate weight {} is NaN, infinite, or not positive",
            context,
            total
        );
        Err(BaggingError::invalid_aggregate_weight(total))
    }
}
