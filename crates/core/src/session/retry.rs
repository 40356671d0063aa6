//! Bounded retry with fixed delay
//!
//! The policy is an explicit value object consumed by a generic executor;
//! retry loops are never inlined at call sites.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};
use unilink_domain::SessionConfig;

/// Retry policy: total attempts and the fixed delay between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts: max_attempts.max(1), delay }
    }

    /// Policy for profile loads during session establishment.
    pub fn profile_load(config: &SessionConfig) -> Self {
        Self::new(
            config.profile_load_attempts,
            Duration::from_millis(config.profile_load_delay_ms),
        )
    }
}

/// Run `operation` under `policy`, stopping on first success.
///
/// The delay between attempts is a cooperative suspension, never a busy
/// wait. Returns the last error once attempts are exhausted.
pub async fn retry<T, E, F, Fut>(policy: RetryPolicy, mut operation: F) -> Result<T, E>
where
    E: fmt::Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 1;
    loop {
        match operation(attempt).await {
            Ok(value) => {
                debug!(attempt, "operation succeeded");
                return Ok(value);
            }
            Err(err) if attempt < policy.max_attempts => {
                warn!(attempt, max_attempts = policy.max_attempts, error = %err, "retrying");
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(err) => {
                warn!(attempt, error = %err, "attempts exhausted");
                return Err(err);
            }
        }
    }
}
