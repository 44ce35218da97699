//! System constants and alignment specifications for bag generation.

/// Memory alignment size for SIMD operations (32-byte aligned).
/// Every bag array is allocated on this boundary.
pub const ALIGNED_SIZE: usize = 32;

/// Default seed for the bagging random number generator.
pub const DEFAULT_BAGGING_SEED: u64 = 3;

/// Default number of bags requested per training round.
/// 0 disables bagging: a single flat bag is produced.
pub const DEFAULT_BAG_COUNT: usize = 0;

/// Relative tolerance used by debug builds when cross-checking the exact
/// bootstrap total against an independent safe summation.
pub const DEBUG_TOTAL_TOLERANCE: f64 = 1e-3;

/// Environment variable overriding the requested bag count.
pub const ENV_BAG_COUNT: &str = "BAGGING_BAG_COUNT";

/// Environment variable overriding the bagging seed.
pub const ENV_BAGGING_SEED: &str = "BAGGING_SEED";

/// Environment variable setting the bag memory budget in bytes.
pub const ENV_MAX_MEMORY_BYTES: &str = "BAGGING_MAX_MEMORY_BYTES";

/// Crate version string.
pub const BOOSTING_BAGS_VERSION: &str = env!("CARGO_PKG_VERSION");
