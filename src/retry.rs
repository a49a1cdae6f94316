//! Retry policy for transient operations
//!
//! A [`RetryPolicy`] describes how many times an operation is attempted and
//! how long to wait between attempts. It is used for the initial database
//! connectivity check but accepts any async fallible operation.

use serde::Deserialize;
use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Delay growth between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Backoff {
    /// Wait the same delay before every retry
    Fixed,

    /// Double the delay after every failed attempt
    Exponential,
}

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one
    #[serde(rename = "max-attempts", default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Base delay between attempts (milliseconds)
    #[serde(rename = "delay-ms", default = "default_delay_ms")]
    pub delay_ms: u64,

    #[serde(default = "default_backoff")]
    pub backoff: Backoff,
}

fn default_max_attempts() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    1000
}

fn default_backoff() -> Backoff {
    Backoff::Fixed
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
            backoff: default_backoff(),
        }
    }
}

impl RetryPolicy {
    /// Creates a fixed-delay policy
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay_ms: delay.as_millis() as u64,
            backoff: Backoff::Fixed,
        }
    }

    /// Returns the delay to wait after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let base = Duration::from_millis(self.delay_ms);
        match self.backoff {
            Backoff::Fixed => base,
            Backoff::Exponential => {
                let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
                base.saturating_mul(factor)
            }
        }
    }

    /// Runs `op` until it succeeds or the attempts are exhausted
    ///
    /// # Arguments
    ///
    /// * `label` - Short description of the operation, used in log messages
    /// * `op` - Factory producing a fresh future for every attempt
    ///
    /// # Returns
    ///
    /// The first successful value, or the error of the final attempt
    pub async fn run<T, E, F, Fut>(&self, label: &str, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt >= max_attempts => {
                    tracing::error!("{} failed after {} attempt(s): {}", label, attempt, e);
                    return Err(e);
                }
                Err(e) => {
                    let delay = self.delay_after(attempt);
                    tracing::warn!(
                        "{} attempt {} of {} failed: {}; retrying in {:?}",
                        label,
                        attempt,
                        max_attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
