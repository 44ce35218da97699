//! Core infrastructure shared by the bag factories.
//!
//! # Organization
//!
//! - [`types`]: Weight, total, and count aliases plus [`types::BagKind`]
//! - [`constants`]: Alignment, defaults, and environment variable names
//! - [`error`]: [`BaggingError`] and [`MemoryError`]
//! - [`memory`]: Aligned, budget-aware buffers backing every bag array
//! - [`utils`]: Random sampling, safe summation, and contract checks
//!
//! ```rust
//! use boosting_bags::core::{
//!     memory::{AlignedBuffer, MemoryBudget},
//!     types::Weight,
//! };
//!
//! let budget = MemoryBudget::new(1024);
//! let buffer = AlignedBuffer::<Weight>::filled(64, 1.0, Some(&budget))?;
//! assert!(buffer.is_aligned());
//! assert_eq!(budget.in_use(), 256);
//! # Ok::<(), boosting_bags::core::error::MemoryError>(())
//! ```

pub mod constants;
pub mod error;
pub mod memory;
pub mod types;
pub mod utils;

pub use constants::*;
pub use error::{BaggingError, MemoryError, Result};
pub use memory::{AlignedBuffer, MemoryBudget, MemoryReservation};
pub use types::*;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Version information for the core module
pub const CORE_MODULE_VERSION: &str = env!("CARGO_PKG_VERSION");

static CORE_INITIALIZED: AtomicBool = AtomicBool::new(false);
static CORE_INIT_LOCK: Mutex<()> = Mutex::new(());

/// Initialize logging and verify aligned allocation. Safe to call repeatedly.
pub fn initialize_core() -> Result<()> {
    if CORE_INITIALIZED.load(Ordering::Acquire) {
        return Ok(());
    }

    let _guard = CORE_INIT_LOCK
        .lock()
        .map_err(|_| BaggingError::internal("core initialization lock poisoned"))?;
    if CORE_INITIALIZED.load(Ordering::Acquire) {
        return Ok(());
    }

    initialize_logging();

    if !verify_memory_alignment() {
        return Err(BaggingError::internal(
            "aligned memory verification failed",
        ));
    }

    CORE_INITIALIZED.store(true, Ordering::Release);
    log::info!("Core module initialized (version {})", CORE_MODULE_VERSION);
    Ok(())
}

/// Check if the core module is initialized
pub fn is_core_initialized() -> bool {
    CORE_INITIALIZED.load(Ordering::Acquire)
}

fn initialize_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    // Another logger may already be installed.
    let _ = env_logger::try_init();
}

fn verify_memory_alignment() -> bool {
    AlignedBuffer::<Weight>::filled(100, 0.0, None)
        .map(|buffer| buffer.is_aligned())
        .unwrap_or(false)
}
