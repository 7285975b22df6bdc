//! crates/logging/src/error.rs
//! Caller-visible failure taxonomy for the logging core.

use thiserror::Error;

use crate::code::InvalidLogCodeError;
use crate::filter::FilterSpecError;
use crate::level::ParseLevelError;

/// Result type for logging operations.
pub type LogResult<T> = Result<T, LogError>;

/// Errors surfaced synchronously by the logging core.
///
/// Configuration mistakes are programmer errors, not runtime conditions to
/// recover from, so they fail immediately instead of being defaulted and
/// continued. By contrast, lifecycle-ordering situations (no formatter
/// configured, deindenting a thread with no recorded state) are benign
/// no-ops and never reach this type.
#[derive(Debug, Error)]
pub enum LogError {
    /// Level text outside the fixed vocabulary.
    #[error(transparent)]
    Level(#[from] ParseLevelError),
    /// Malformed filter spec entry.
    #[error(transparent)]
    FilterSpec(#[from] FilterSpecError),
    /// Text that does not satisfy the log-code shape.
    #[error(transparent)]
    Code(#[from] InvalidLogCodeError),
    /// A log statement or enablement check was attempted at
    /// [`Level::Off`](crate::Level::Off), which is a configuration value,
    /// never a message severity.
    #[error("cannot log at level `off`")]
    OffLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_errors_convert() {
        let parse_err = "nope".parse::<crate::Level>().unwrap_err();
        let err: LogError = parse_err.into();
        assert!(matches!(err, LogError::Level(_)));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn off_level_has_a_clear_message() {
        assert_eq!(LogError::OffLevel.to_string(), "cannot log at level `off`");
    }
}
