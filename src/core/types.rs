//! Core data types for bag generation.
//!
//! Per-sample values are kept in a fast 32-bit precision so bag arrays stay
//! compact and SIMD friendly, while aggregates over a whole bag are carried in
//! 64-bit precision.

use serde::{Deserialize, Serialize};
use static_assertions::const_assert;
use std::fmt;

/// Per-sample weight type (fast precision).
/// 32-bit float, the same width the boosting loop uses for sample weights.
pub type Weight = f32;

/// Aggregate weight type (high precision).
/// 64-bit float providing numerical stability when summing a whole bag.
pub type WeightTotal = f64;

/// Number of times one sample participates in a bag.
pub type OccurrenceCount = usize;

/// Index of a training sample.
pub type SampleIndex = usize;

const_assert!(std::mem::size_of::<WeightTotal>() >= std::mem::size_of::<Weight>());

/// How a bag's occurrence counts were produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BagKind {
    /// Sampling with replacement: `sample_count` uniform draws.
    Bootstrap,
    /// Every sample exactly once (bagging disabled).
    Flat,
}

impl fmt::Display for BagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BagKind::Bootstrap => write!(f, "bootstrap"),
            BagKind::Flat => write!(f, "flat"),
        }
    }
}
