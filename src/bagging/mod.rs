//! Bootstrap bag generation for boosting rounds.
//!
//! Each boosting round trains on one or more bags. A [`Bag`] records how often
//! every training sample occurs and the resulting effective weights.
//! [`BagFactory`] builds bootstrap bags (sampling with replacement from a
//! caller-supplied generator) and flat bags (every sample exactly once), and
//! [`BagSet`] builds the full per-round collection with all-or-nothing
//! semantics.
//!
//! ```rust
//! use boosting_bags::bagging::{BagFactory, BagSet};
//! use boosting_bags::core::utils::random::Random;
//!
//! let mut rng = Random::with_seed(7);
//! let set = BagSet::construct(&mut rng, 100, None, 4)?;
//! assert_eq!(set.len(), 4);
//! for bag in &set {
//!     assert_eq!(bag.occurrences().iter().sum::<usize>(), 100);
//! }
//!
//! // A requested count of 0 disables bagging: one flat bag.
//! let flat = BagFactory::new().bag_set(&mut rng, 100, None, 0)?;
//! assert_eq!(flat.len(), 1);
//! assert_eq!(flat.release(), 1);
//! # Ok::<(), boosting_bags::BaggingError>(())
//! ```

pub mod bag;
pub mod factory;
pub mod set;

pub use bag::Bag;
pub use factory::BagFactory;
pub use set::{release_bag_set, BagSet};

/// Number of bag slots a set built for `requested_bag_count` holds.
///
/// 0 requests bagging disabled, which still produces exactly one (flat) bag.
pub fn effective_bag_count(requested_bag_count: usize) -> usize {
    requested_bag_count.max(1)
}
