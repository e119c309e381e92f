//! Retry utility for handling transient errors in blocking operations
//!
//! Provides configurable retry policies with exponential backoff and error context.

use std::thread::sleep;
use std::time::Duration;

/// Configurable retry policy
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
    /// Multiplier applied to the delay after each failed attempt
    pub backoff_factor: u32,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_millis(10),
            backoff_factor: 2,
            max_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given (zero-based) failed attempt
    pub fn delay_for(&self, attempt: usize) -> Duration {
        let exponent = u32::try_from(attempt).unwrap_or(u32::MAX);
        let factor = self.backoff_factor.max(1).saturating_pow(exponent);
        self.delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Effective attempt count; a policy of zero still runs the operation once
    pub fn attempts(&self) -> usize {
        self.max_attempts.max(1)
    }
}

/// Execute an operation with retry logic for errors accepted by `should_retry`
///
/// Errors rejected by `should_retry` are returned immediately. When every
/// attempt fails the last error is returned.
///
/// # Examples
/// ```rust
/// use sensorbuf::core::retry::{retry_if, RetryPolicy};
///
/// let mut calls = 0;
/// let result = retry_if("flaky_read", &RetryPolicy::default(), |_: &&str| true, || {
///     calls += 1;
///     if calls < 2 { Err("busy") } else { Ok(calls) }
/// });
/// assert_eq!(result, Ok(2));
/// ```
pub fn retry_if<F, T, E, P>(
    operation_name: &str,
    policy: &RetryPolicy,
    mut should_retry: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    P: FnMut(&E) -> bool,
    E: std::fmt::Display,
{
    let attempts = policy.attempts();
    let mut attempt = 0;

    loop {
        match operation() {
            Ok(result) => return Ok(result),
            Err(error) => {
                if !should_retry(&error) || attempt + 1 >= attempts {
                    return Err(error);
                }
                let delay = policy.delay_for(attempt);
                log::debug!(
                    "Operation '{}' failed on attempt {}/{}, retrying in {:?}: {}",
                    operation_name,
                    attempt + 1,
                    attempts,
                    delay,
                    error
                );
                sleep(delay);
                attempt += 1;
            }
        }
    }
}
