//! Bagging configuration structure and builder.
//!
//! The configuration decides how many bags a training run requests and how
//! they are seeded; the bag factories themselves only act on the values they
//! are handed.

use crate::bagging::BagFactory;
use crate::core::constants::*;
use crate::core::error::{BaggingError, Result};
use crate::core::memory::MemoryBudget;
use crate::core::utils::random::Random;

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for per-round bag generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaggingConfig {
    /// Number of bootstrap bags per round (0 = bagging disabled, one flat bag)
    pub bag_count: usize,
    /// Random seed for bagging
    pub bagging_seed: u64,
    /// Upper bound on bytes held by bag storage built from this configuration
    pub max_bag_memory_bytes: Option<usize>,
}

impl Default for BaggingConfig {
    fn default() -> Self {
        BaggingConfig {
            bag_count: DEFAULT_BAG_COUNT,
            bagging_seed: DEFAULT_BAGGING_SEED,
            max_bag_memory_bytes: None,
        }
    }
}

impl BaggingConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.max_bag_memory_bytes {
            if limit == 0 {
                return Err(BaggingError::invalid_parameter(
                    "max_bag_memory_bytes",
                    limit.to_string(),
                    "must be positive when set",
                ));
            }
        }
        Ok(())
    }

    /// Whether bootstrap bagging is enabled for each round.
    pub fn is_bagging_enabled(&self) -> bool {
        self.bag_count > 0
    }

    /// Deterministic generator seeded from `bagging_seed`.
    pub fn create_rng(&self) -> Random {
        Random::with_seed(self.bagging_seed)
    }

    /// Bag factory honouring `max_bag_memory_bytes`.
    pub fn create_factory(&self) -> BagFactory {
        match self.max_bag_memory_bytes {
            Some(limit) => BagFactory::with_budget(MemoryBudget::new(limit)),
            None => BagFactory::new(),
        }
    }

    /// Load configuration from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let config: BaggingConfig = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            Some("toml") => toml::from_str(&content)?,
            _ => {
                return Err(BaggingError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        config.validate()?;
        log::debug!("Loaded bagging configuration from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = match path.extension().and_then(|s| s.to_str()) {
            Some("json") => serde_json::to_string_pretty(self)?,
            Some("toml") => toml::to_string_pretty(self)
                .map_err(|e| BaggingError::config(format!("Failed to serialize to TOML: {}", e)))?,
            _ => {
                return Err(BaggingError::config(
                    "Unsupported config file format. Use .json or .toml",
                ))
            }
        };

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from environment variables
    pub fn load_from_environment() -> Result<Self> {
        let mut config = BaggingConfig::default();
        config.apply_environment_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides to this configuration
    pub fn apply_environment_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var(ENV_BAG_COUNT) {
            self.bag_count = val
                .parse()
                .map_err(|_| BaggingError::config(format!("Invalid {}", ENV_BAG_COUNT)))?;
        }

        if let Ok(val) = std::env::var(ENV_BAGGING_SEED) {
            self.bagging_seed = val
                .parse()
                .map_err(|_| BaggingError::config(format!("Invalid {}", ENV_BAGGING_SEED)))?;
        }

        if let Ok(val) = std::env::var(ENV_MAX_MEMORY_BYTES) {
            self.max_bag_memory_bytes = Some(
                val.parse()
                    .map_err(|_| BaggingError::config(format!("Invalid {}", ENV_MAX_MEMORY_BYTES)))?,
            );
        }

        self.validate()
    }
}

/// Builder for [`BaggingConfig`].
#[derive(Debug)]
pub struct BaggingConfigBuilder {
    config: BaggingConfig,
    validation_errors: Vec<String>,
}

impl BaggingConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        BaggingConfigBuilder {
            config: BaggingConfig::default(),
            validation_errors: Vec::new(),
        }
    }

    /// Set the number of bags per round
    pub fn bag_count(mut self, count: usize) -> Self {
        self.config.bag_count = count;
        self
    }

    /// Set the bagging seed
    pub fn bagging_seed(mut self, seed: u64) -> Self {
        self.config.bagging_seed = seed;
        self
    }

    /// Cap the bytes held by bag storage
    pub fn max_bag_memory_bytes(mut self, limit: usize) -> Self {
        if limit == 0 {
            self.validation_errors
                .push("max_bag_memory_bytes must be positive".to_string());
        }
        self.config.max_bag_memory_bytes = Some(limit);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<BaggingConfig> {
        if !self.validation_errors.is_empty() {
            return Err(BaggingError::config(format!(
                "Configuration validation failed: {}",
                self.validation_errors.join(", ")
            )));
        }

        self.config.validate()?;
        Ok(self.config)
    }
}

impl Default for BaggingConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
