use std::future::Future;
use tracing::warn;

pub const RETRY_INITIAL_DELAY: u64 = 1000;
pub const RETRY_BACKOFF_FACTOR: u64 = 2;
pub const RETRY_MAX_DELAY: u64 = 30_000;

/// Transport-level retry policy for provider calls. The conversational
/// retry loop sits above this and has its own attempt budget.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_delay: u64,
    pub backoff_factor: u64,
    pub max_delay: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: RETRY_INITIAL_DELAY,
            backoff_factor: RETRY_BACKOFF_FACTOR,
            max_delay: RETRY_MAX_DELAY,
        }
    }
}

/// Implement this on error types so the retry helper knows whether to retry.
/// Return `Some(message)` when the error is retryable, `None` otherwise.
pub trait IsRetryable {
    fn is_retryable(&self) -> Option<String>;
}

/// Delay before the next attempt: `initial * factor^(attempt-1)`, capped.
pub fn delay(attempt: u32, config: &RetryConfig) -> u64 {
    let exp = config
        .backoff_factor
        .saturating_pow(attempt.saturating_sub(1));
    config.initial_delay.saturating_mul(exp).min(config.max_delay)
}

/// Retry an async operation up to `config.max_attempts` times.
///
/// The closure `f` is called on each attempt. If it returns `Err(e)` and
/// `e.is_retryable()` returns `Some(_)`, the helper sleeps for the computed
/// backoff and tries again. Otherwise the error is returned immediately.
pub async fn with_retry<F, Fut, T, E>(config: &RetryConfig, mut f: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: IsRetryable + std::fmt::Debug,
{
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        match f().await {
            Ok(val) => return Ok(val),
            Err(e) => {
                if attempt >= config.max_attempts {
                    return Err(e);
                }
                match e.is_retryable() {
                    Some(msg) => {
                        let delay_ms = delay(attempt, config);
                        warn!(
                            attempt,
                            max = config.max_attempts,
                            delay_ms,
                            reason = %msg,
                            "retrying after transient error"
                        );
                        tokio::time::sleep(std::time::Duration::from_millis(delay_ms)).await;
                    }
                    None => return Err(e),
                }
            }
        }
    }
}
