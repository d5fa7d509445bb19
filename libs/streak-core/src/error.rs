//! Error types for streak-core.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias using StreakError.
pub type Result<T> = std::result::Result<T, StreakError>;

/// Errors raised by streak rules and calendar derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreakError {
    #[error("invalid streak count: {0}")]
    InvalidCount(i64),

    #[error("date out of supported range near {0}")]
    DateOutOfRange(NaiveDate),
}
