//! Contract checks for caller misuse.
//!
//! A failed check is a programming error, not a runtime condition: it is
//! logged at error level and then panics. Recoverable failures (allocation,
//! degenerate weights) go through [`crate::core::error::BaggingError`] instead.

/// Logs a contract violation and panics.
#[cold]
#[track_caller]
pub fn contract_violation(message: &str) -> ! {
    ::log::error!("Contract violation: {}", message);
    panic!("Contract violation: {}", message);
}

/// Checks that a condition is true, panics with a contract violation if false.
#[macro_export]
macro_rules! check {
    ($condition:expr) => {
        if !($condition) {
            $crate::core::utils::log::contract_violation(&format!(
                "Check failed: {} at {}:{}",
                stringify!($condition),
                file!(),
                line!()
            ));
        }
    };
    ($condition:expr, $($arg:tt)+) => {
        if !($condition) {
            $crate::core::utils::log::contract_violation(&format!(
                "Check failed: {} ({}) at {}:{}",
                stringify!($condition),
                format_args!($($arg)+),
                file!(),
                line!()
            ));
        }
    };
}
