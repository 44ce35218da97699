//! Error handling and error types for bag generation.
//!
//! Every fallible operation returns [`Result`]. A failed construction has
//! already released everything it acquired by the time the error reaches the
//! caller, so an `Err` never carries ownership of a partial bag.

use std::io;
use thiserror::Error;

/// Main error type for the bagging library.
#[derive(Error, Debug)]
pub enum BaggingError {
    /// Memory allocation and management errors
    #[error("Memory error: {message}")]
    Memory { message: String },

    /// The summed weight of a bag is NaN, infinite, or not strictly positive
    #[error("Invalid aggregate weight: {total}")]
    InvalidAggregateWeight { total: f64 },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}, {reason}")]
    InvalidParameter {
        parameter: String,
        value: String,
        reason: String,
    },

    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// File I/O errors
    #[error("I/O error: {source}")]
    IO {
        #[from]
        source: io::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },

    /// TOML parsing errors
    #[error("TOML error: {source}")]
    Toml {
        #[from]
        source: toml::de::Error,
    },

    /// Internal library errors (should not occur in normal usage)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Memory-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Allocation failed: requested {size} bytes")]
    AllocationFailed { size: usize },

    #[error("Array layout overflow: {elements} elements of {element_size} bytes")]
    LayoutOverflow {
        elements: usize,
        element_size: usize,
    },

    #[error("Memory budget exceeded: requested {requested} bytes, available {available} bytes")]
    BudgetExceeded { requested: usize, available: usize },
}

/// Type alias for Results using BaggingError
pub type Result<T> = std::result::Result<T, BaggingError>;

impl BaggingError {
    /// Create a memory error
    pub fn memory<S: Into<String>>(message: S) -> Self {
        BaggingError::Memory {
            message: message.into(),
        }
    }

    /// Create an invalid aggregate weight error
    pub fn invalid_aggregate_weight(total: f64) -> Self {
        BaggingError::InvalidAggregateWeight { total }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        BaggingError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter<P, V, R>(parameter: P, value: V, reason: R) -> Self
    where
        P: Into<String>,
        V: Into<String>,
        R: Into<String>,
    {
        BaggingError::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        BaggingError::Config {
            message: message.into(),
        }
    }

    /// Create an internal error (should be used sparingly)
    pub fn internal<S: Into<String>>(message: S) -> Self {
        BaggingError::Internal {
            message: message.into(),
        }
    }

    /// Whether the current training round can be abandoned and retried later.
    ///
    /// Allocation failure and a degenerate aggregate weight are local to one
    /// round; bad configuration or input shapes will fail again unchanged.
    pub fn is_recoverable(&self) -> bool {
        match self {
            BaggingError::Memory { .. } => true,
            BaggingError::InvalidAggregateWeight { .. } => true,
            BaggingError::DimensionMismatch { .. } => false,
            BaggingError::InvalidParameter { .. } => false,
            BaggingError::Config { .. } => false,
            BaggingError::IO { .. } => false,
            BaggingError::Json { .. } => false,
            BaggingError::Toml { .. } => false,
            BaggingError::Internal { .. } => false,
        }
    }

    /// Get error category for logging and metrics
    pub fn category(&self) -> &'static str {
        match self {
            BaggingError::Memory { .. } => "memory",
            BaggingError::InvalidAggregateWeight { .. } => "invalid_aggregate_weight",
            BaggingError::DimensionMismatch { .. } => "dimension_mismatch",
            BaggingError::InvalidParameter { .. } => "invalid_parameter",
            BaggingError::Config { .. } => "config",
            BaggingError::IO { .. } => "io",
            BaggingError::Json { .. } => "json",
            BaggingError::Toml { .. } => "toml",
            BaggingError::Internal { .. } => "internal",
        }
    }
}

impl From<MemoryError> for BaggingError {
    fn from(err: MemoryError) -> Self {
        BaggingError::Memory {
            message: err.to_string(),
        }
    }
}
