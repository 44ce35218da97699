//! Per-round bag sets with all-or-nothing construction.

use super::bag::Bag;
use super::effective_bag_count;
use super::factory::BagFactory;
use crate::core::error::{BaggingError, MemoryError, Result};
use crate::core::memory::MemoryReservation;
use crate::core::types::Weight;
use crate::core::utils::random::BootstrapRng;

/// The bags produced for one boosting round.
///
/// A requested count of 0 means bagging is disabled and the set holds exactly
/// one flat bag. Any other count `k` yields `k` bootstrap bags, drawn in slot
/// order from the same generator. Construction is all-or-nothing: on failure
/// every bag built so far is released before the error is returned.
#[derive(Debug)]
pub struct BagSet {
    requested_bag_count: usize,
    slots: Vec<Option<Bag>>,
    _slot_reservation: Option<MemoryReservation>,
}

impl BagSet {
    /// Build a set with an unbudgeted [`BagFactory`].
    pub fn construct<R>(
        rng: &mut R,
        sample_count: usize,
        external_weights: Option<&[Weight]>,
        requested_bag_count: usize,
    ) -> Result<Self>
    where
        R: BootstrapRng + ?Sized,
    {
        Self::construct_with(
            &BagFactory::new(),
            rng,
            sample_count,
            external_weights,
            requested_bag_count,
        )
    }

    pub(crate) fn construct_with<R>(
        factory: &BagFactory,
        rng: &mut R,
        sample_count: usize,
        external_weights: Option<&[Weight]>,
        requested_bag_count: usize,
    ) -> Result<Self>
    where
        R: BootstrapRng + ?Sized,
    {
        log::debug!(
            "Entered BagSet::construct (sample_count = {}, requested_bag_count = {})",
            sample_count,
            requested_bag_count
        );

        let slot_count = effective_bag_count(requested_bag_count);
        let slot_bytes = slot_count
            .checked_mul(std::mem::size_of::<Option<Bag>>())
            .ok_or(MemoryError::LayoutOverflow {
                elements: slot_count,
                element_size: std::mem::size_of::<Option<Bag>>(),
            })?;

        let slot_reservation = match factory.budget() {
            Some(budget) => Some(budget.reserve(slot_bytes).map_err(|err| {
                log::warn!("Reserving {} bag slots failed: {}", slot_count, err);
                BaggingError::from(err)
            })?),
            None => None,
        };

        let mut slots: Vec<Option<Bag>> = Vec::new();
        slots.try_reserve_exact(slot_count).map_err(|_| {
            log::warn!("Allocating {} bag slots failed", slot_count);
            BaggingError::memory(format!("failed to allocate {} bag slots", slot_count))
        })?;
        slots.resize_with(slot_count, || None);

        let mut set = BagSet {
            requested_bag_count,
            slots,
            _slot_reservation: slot_reservation,
        };

        if requested_bag_count == 0 {
            let bag = factory.flat(sample_count, external_weights).map_err(|err| {
                log::warn!("Building the flat bag failed: {}", err);
                err
            })?;
            set.slots[0] = Some(bag);
        } else {
            for index in 0..requested_bag_count {
                let bag = factory
                    .bootstrap(rng, sample_count, external_weights)
                    .map_err(|err| {
                        log::warn!(
                            "Building bootstrap bag {} of {} failed: {}",
                            index,
                            requested_bag_count,
                            err
                        );
                        err
                    })?;
                set.slots[index] = Some(bag);
            }
        }

        log::debug!("Exited BagSet::construct ({} bags)", set.len());
        Ok(set)
    }

    /// Assemble a set from already-built bags.
    ///
    /// `slots` must hold exactly `effective_bag_count(requested_bag_count)`
    /// entries and every present bag must cover the same number of samples.
    /// Empty slots are allowed; they are skipped by iteration and release.
    pub fn from_slots(requested_bag_count: usize, slots: Vec<Option<Bag>>) -> Result<Self> {
        let expected = effective_bag_count(requested_bag_count);
        if slots.len() != expected {
            return Err(BaggingError::dimension_mismatch(
                format!("{} slots", expected),
                format!("{} slots", slots.len()),
            ));
        }

        let mut sample_counts = slots.iter().flatten().map(Bag::sample_count);
        if let Some(first) = sample_counts.next() {
            if let Some(other) = sample_counts.find(|&count| count != first) {
                return Err(BaggingError::dimension_mismatch(
                    format!("{} samples per bag", first),
                    format!("{} samples per bag", other),
                ));
            }
        }

        Ok(BagSet {
            requested_bag_count,
            slots,
            _slot_reservation: None,
        })
    }

    /// Number of slots: `requested_bag_count`, or 1 when bagging is disabled.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always false for a constructed set.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Bag count the set was requested with, 0 meaning bagging disabled.
    pub fn requested_bag_count(&self) -> usize {
        self.requested_bag_count
    }

    /// True when the set was requested with 0 bags and holds one flat bag.
    pub fn is_bagging_disabled(&self) -> bool {
        self.requested_bag_count == 0
    }

    /// Bag in slot `index`, if that slot is populated.
    pub fn get(&self, index: usize) -> Option<&Bag> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Populated bags in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &Bag> + '_ {
        self.slots.iter().flatten()
    }

    /// Number of populated slots.
    pub fn populated_count(&self) -> usize {
        self.iter().count()
    }

    /// Samples covered by the bags, `None` if no slot is populated.
    pub fn sample_count(&self) -> Option<usize> {
        self.iter().next().map(Bag::sample_count)
    }

    /// Bytes held by all bag arrays in the set.
    pub fn total_memory_bytes(&self) -> usize {
        self.iter().map(Bag::memory_bytes).sum()
    }

    /// Release every bag and the slot sequence, returning how many bags were released.
    ///
    /// Scans the effective slot count for the set's requested count and skips
    /// empty slots.
    pub fn release(self) -> usize {
        let BagSet {
            requested_bag_count,
            slots,
            _slot_reservation,
        } = self;

        let mut released = 0;
        for bag in slots
            .into_iter()
            .take(effective_bag_count(requested_bag_count))
            .flatten()
        {
            bag.release();
            released += 1;
        }

        log::debug!("Released bag set ({} bags)", released);
        released
    }
}

impl<'a> IntoIterator for &'a BagSet {
    type Item = &'a Bag;
    type IntoIter = std::iter::Flatten<std::slice::Iter<'a, Option<Bag>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter().flatten()
    }
}

/// Release an optional bag set; releasing `None` is a no-op.
///
/// Returns the number of bags released.
pub fn release_bag_set(set: Option<BagSet>) -> usize {
    set.map_or(0, BagSet::release)
}
