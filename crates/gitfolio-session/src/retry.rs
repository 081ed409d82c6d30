use std::future::Future;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Bounded sequential retry around a fallible operation.
///
/// Every failed attempt invokes `on_attempt_failure(attempt, &error)` so
/// the caller can surface a status update. After the attempt budget is
/// spent, `on_exhausted(&error)` fires once and the caller-supplied
/// fallback is returned instead of an error.
#[derive(Debug, Clone, Copy)]
pub struct RetryController {
    max_attempts: u32,
}

impl RetryController {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub async fn execute<T, E, F, Fut, OnFail, OnExhaust>(
        &self,
        mut operation: F,
        mut on_attempt_failure: OnFail,
        mut on_exhausted: OnExhaust,
        fallback: T,
    ) -> T
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
        OnFail: FnMut(u32, &E),
        OnExhaust: FnMut(&E),
    {
        for attempt in 1..=self.max_attempts {
            match operation().await {
                Ok(value) => return value,
                Err(e) => {
                    tracing::warn!(attempt, max = self.max_attempts, error = %e, "attempt failed");
                    on_attempt_failure(attempt, &e);
                    if attempt == self.max_attempts {
                        on_exhausted(&e);
                        return fallback;
                    }
                }
            }
        }
        fallback
    }
}

impl Default for RetryController {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn two_failures_then_success() {
        let controller = RetryController::new(3);
        let calls = AtomicU32::new(0);
        let mut failures = Vec::new();
        let mut exhaustions = 0u32;

        let result = controller
            .execute(
                || {
                    let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
                    async move {
                        if n < 3 {
                            Err(format!("boom {n}"))
                        } else {
                            Ok(42)
                        }
                    }
                },
                |attempt, _e: &String| failures.push(attempt),
                |_e| exhaustions += 1,
                0,
            )
            .await;

        assert_eq!(result, 42);
        assert_eq!(failures, vec![1, 2]);
        assert_eq!(exhaustions, 0);
    }

    #[tokio::test]
    async fn exhaustion_returns_fallback() {
        let controller = RetryController::new(3);
        let mut failures = Vec::new();
        let mut exhaustions = 0u32;

        let result = controller
            .execute(
                || async { Err::<i32, _>("always".to_string()) },
                |attempt, _e| failures.push(attempt),
                |_e| exhaustions += 1,
                -1,
            )
            .await;

        assert_eq!(result, -1);
        assert_eq!(failures, vec![1, 2, 3]);
        assert_eq!(exhaustions, 1);
    }

    #[tokio::test]
    async fn immediate_success_skips_callbacks() {
        let controller = RetryController::default();
        let mut failures = 0u32;
        let mut exhaustions = 0u32;
        let result = controller
            .execute(
                || async { Ok::<_, String>("fine") },
                |_, _| failures += 1,
                |_| exhaustions += 1,
                "fallback",
            )
            .await;
        assert_eq!(result, "fine");
        assert_eq!(failures, 0);
        assert_eq!(exhaustions, 0);
    }
}
