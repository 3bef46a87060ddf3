//! Connection-failure classification with exponential backoff.
//!
//! Retry is a caller-driven decision: nothing here sleeps or reconnects.
//! The policy turns (error, attempt number) into a [`RetryDecision`] the
//! caller acts on.

use std::fmt;
use std::time::Duration;

/// Base delay used when the caller does not supply one.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Caller-supplied retry bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts allowed before giving up.
    pub max_retries: u32,
    /// Delay before the first retry; doubles per consecutive failure.
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Classify a connection failure on attempt `current_attempt`
    /// (zero-based).
    ///
    /// Backoff is `base_delay * 2^current_attempt`, no jitter, no cap -
    /// callers needing a ceiling clamp the returned delay. Arithmetic
    /// saturates instead of overflowing for absurd attempt counts.
    pub fn evaluate<E: fmt::Display>(&self, error: &E, current_attempt: u32) -> RetryDecision {
        if current_attempt >= self.max_retries {
            return RetryDecision {
                should_retry: false,
                retry_delay: Duration::ZERO,
                retry_count: current_attempt,
                error_message:
                    "Failed to establish streaming connection after maximum retries".to_string(),
            };
        }

        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let factor = 1u64.checked_shl(current_attempt).unwrap_or(u64::MAX);
        RetryDecision {
            should_retry: true,
            retry_delay: Duration::from_millis(base_ms.saturating_mul(factor)),
            retry_count: current_attempt + 1,
            error_message: error.to_string(),
        }
    }
}

/// One retry decision. `retry_count` is the attempt number to report on
/// the next failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryDecision {
    pub should_retry: bool,
    pub retry_delay: Duration,
    pub retry_count: u32,
    pub error_message: String,
}

/// Convenience form taking the bounds inline rather than via a policy
/// value.
pub fn handle_connection_error<E: fmt::Display>(
    error: &E,
    current_attempt: u32,
    max_retries: u32,
    base_delay: Duration,
) -> RetryDecision {
    RetryPolicy {
        max_retries,
        base_delay,
    }
    .evaluate(error, current_attempt)
}
