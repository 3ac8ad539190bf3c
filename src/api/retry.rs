use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::{AppError, AppResult};

/// Per-view retry configuration: either fail immediately or back off
/// exponentially up to a cap.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// One attempt, no retry.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    #[must_use]
    pub const fn backoff(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
        }
    }

    /// Delay before re-issuing after `failures` failed attempts: base × 2^(n−1),
    /// capped at `max_delay`.
    #[must_use]
    pub fn delay_for(&self, failures: u32) -> Duration {
        let exponent = failures.saturating_sub(1).min(16);
        let factor = 1u64 << exponent;
        let base_ms = u64::try_from(self.base_delay.as_millis()).unwrap_or(u64::MAX);
        let max_ms = u64::try_from(self.max_delay.as_millis()).unwrap_or(u64::MAX);
        Duration::from_millis(base_ms.saturating_mul(factor).min(max_ms))
    }
}

/// Runs `op`, re-issuing it per the policy when the failure is retryable.
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, and immediately for
/// non-retryable failures (client statuses, decode errors).
pub async fn with_retry<T, Fut>(
    policy: RetryPolicy,
    what: &str,
    mut op: impl FnMut() -> Fut,
) -> AppResult<T>
where
    Fut: Future<Output = AppResult<T>>,
{
    let mut attempt = 0u32;
    loop {
        attempt = attempt.saturating_add(1);
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let retryable = matches!(&err, AppError::Api(api) if api.is_retryable());
                if !retryable || attempt >= policy.max_attempts.max(1) {
                    return Err(err);
                }
                let delay = policy.delay_for(attempt);
                warn!(what, attempt, ?delay, "request failed, retrying: {}", err);
                tokio::time::sleep(delay).await;
            }
        }
    }
}
