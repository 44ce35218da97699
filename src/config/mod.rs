//! Configuration management for bag generation.
//!
//! [`BaggingConfig`] can be built in code through [`BaggingConfigBuilder`],
//! loaded from a `.json` or `.toml` file, or overridden from environment
//! variables (`BAGGING_BAG_COUNT`, `BAGGING_SEED`, `BAGGING_MAX_MEMORY_BYTES`).

pub mod core;

pub use self::core::{BaggingConfig, BaggingConfigBuilder};
