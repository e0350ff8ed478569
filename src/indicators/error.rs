//! Indicator error types.

use thiserror::Error;

/// Errors raised by the indicator math.
///
/// Nothing in the indicator layer recovers from these; they propagate to the
/// caller, which decides whether to skip the day or abort the run.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// Input does not satisfy the caller-enforced preconditions (empty or
    /// too-short slice, odd period, window past the end of the series, ...).
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// A logarithm or division would be applied to a non-positive argument.
    #[error("domain error: {0}")]
    DomainError(String),
}

impl IndicatorError {
    /// Creates a `PreconditionViolation` with a message.
    #[must_use]
    pub fn precondition(msg: impl Into<String>) -> Self {
        IndicatorError::PreconditionViolation(msg.into())
    }

    /// Creates a `DomainError` with a message.
    #[must_use]
    pub fn domain(msg: impl Into<String>) -> Self {
        IndicatorError::DomainError(msg.into())
    }
}

/// Result alias used across the indicator modules.
pub type IndicatorResult<T> = Result<T, IndicatorError>;
