/// Numeric helpers (safe summation)
pub mod common;
/// Contract-violation checks
pub mod log;
/// Deterministic random number generation
pub mod random;
