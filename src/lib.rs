//! # Boosting Bags
//!
//! Bootstrap bag generation for a gradient boosting training engine.
//!
//! Before each boosting round the trainer asks for a set of bags. A bag says,
//! for every training sample, how many times it takes part in the round and
//! what its effective weight is. Bags are either drawn by bootstrap resampling
//! (sampling with replacement) or are flat, meaning every sample exactly once
//! when bagging is disabled.
//!
//! ## Features
//!
//! - **All-or-nothing construction**: a bag or bag set is either fully built
//!   or nothing is left behind; partially built bags are released on error.
//! - **Deterministic sampling**: bags consume a caller-supplied generator in a
//!   fixed order, so a seeded [`Random`] reproduces the same bags.
//! - **Safe totals**: aggregate weights use compensated summation and are
//!   rejected when NaN, infinite, or not positive.
//! - **Aligned, budgeted storage**: per-sample arrays are 32-byte aligned and
//!   can be charged to a [`MemoryBudget`].
//!
//! ## Quick Start
//!
//! ```rust
//! use boosting_bags::{BaggingConfigBuilder, BagKind};
//!
//! # fn main() -> boosting_bags::Result<()> {
//! let config = BaggingConfigBuilder::new()
//!     .bag_count(3)
//!     .bagging_seed(42)
//!     .build()?;
//!
//! let mut rng = config.create_rng();
//! let factory = config.create_factory();
//! let weights = vec![1.0f32, 2.0, 0.5, 1.5, 1.0];
//!
//! let set = factory.bag_set(&mut rng, weights.len(), Some(weights.as_slice()), config.bag_count)?;
//! assert_eq!(set.len(), 3);
//! for bag in &set {
//!     assert_eq!(bag.kind(), BagKind::Bootstrap);
//!     assert!(bag.weight_total() > 0.0);
//! }
//! set.release();
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: Types, constants, errors, aligned memory, and utilities
//! - [`config`]: [`BaggingConfig`] and its builder
//! - [`bagging`]: [`Bag`], [`BagFactory`], and [`BagSet`]

#![doc(html_root_url = "https://docs.rs/boosting-bags/")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub,
    non_snake_case,
    non_upper_case_globals
)]

// Core infrastructure module - always available
pub mod core;

// Configuration management module
pub mod config;

// Bag generation module
pub mod bagging;

// Re-export core functionality for convenience
pub use crate::core::{
    constants::*,
    error::{BaggingError, MemoryError, Result},
    memory::{AlignedBuffer, MemoryBudget, MemoryReservation},
    types::*,
    utils::common::Common,
    utils::random::{BootstrapRng, Random},
};

// Re-export configuration functionality
pub use config::{BaggingConfig, BaggingConfigBuilder};

// Re-export bag generation functionality
pub use bagging::{effective_bag_count, release_bag_set, Bag, BagFactory, BagSet};

// Version information
/// Library version string
pub const VERSION: &str = BOOSTING_BAGS_VERSION;

/// Initialize the library.
///
/// Installs an `env_logger` logger (defaulting `RUST_LOG` to `info`) and
/// verifies aligned allocation. Calling it is optional and idempotent.
///
/// # Examples
///
/// ```rust
/// fn main() -> boosting_bags::Result<()> {
///     boosting_bags::init()?;
///     assert!(boosting_bags::is_initialized());
///     Ok(())
/// }
/// ```
pub fn init() -> Result<()> {
    crate::core::initialize_core()
}

/// Check if the library has been initialized.
pub fn is_initialized() -> bool {
    crate::core::is_core_initialized()
}
