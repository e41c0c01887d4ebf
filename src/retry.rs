use crate::error::DriveError;
use log::warn;
use std::future::Future;
use std::time::Duration;

/// Exponential backoff policy for transient Drive errors.
#[derive(Debug, Clone)]
pub struct Backoff {
    /// Total number of calls before giving up, including the first one.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Backoff {
            max_attempts: 5,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl Backoff {
    /// Delay before retry number `attempt` (zero-based): `base * 2^attempt`
    /// plus a small attempt-proportional jitter so parallel runs do not
    /// retry in lockstep.
    pub fn delay(&self, attempt: u32) -> Duration {
        self.base_delay * (1u32 << attempt.min(16)) + self.base_delay.mul_f64(0.1 * f64::from(attempt))
    }
}

/// Runs `call` until it succeeds, fails permanently, or exhausts the policy.
///
/// Rate-limit errors are retried with exponentially growing sleeps; any other
/// error is returned as-is. After `max_attempts` failed calls the wrapper
/// gives up with [`DriveError::RetriesExhausted`] naming the operation.
pub async fn with_backoff<T, F, Fut>(
    operation: &str,
    backoff: &Backoff,
    mut call: F,
) -> Result<T, DriveError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, DriveError>>,
{
    let mut failures = 0;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => {
                failures += 1;
                if failures >= backoff.max_attempts {
                    return Err(DriveError::RetriesExhausted {
                        operation: operation.to_owned(),
                        attempts: failures,
                    });
                }
                let delay = backoff.delay(failures - 1);
                warn!(
                    "{}: {}; retrying in {:?} (attempt {}/{})",
                    operation,
                    e,
                    delay,
                    failures + 1,
                    backoff.max_attempts
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}
