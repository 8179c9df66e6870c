//! Retry composition for remote calls.
//!
//! Retries live at this layer only. The HTTP transport and the spreadsheet
//! connector execute each request exactly once, and [`with_retry`] wraps the
//! call sites that are allowed to repeat work: credential loading and opening
//! a spreadsheet. Which errors are worth repeating is decided by a predicate,
//! so each call site pairs the policy with its own error type's
//! `is_retryable`.

use std::fmt::Display;
use std::future::Future;

use bridge_traits::http::RetryPolicy;
use tracing::warn;

/// Run `operation` until it succeeds, the policy is exhausted, or an error
/// the predicate rejects comes back.
///
/// Attempts are counted from 1, so a policy with `max_attempts = 3` runs the
/// operation at most three times with a delay between consecutive attempts.
/// A policy with `max_attempts` of zero still runs the operation once. The
/// final error is returned to the caller unchanged.
pub async fn with_retry<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    operation_name: &str,
    is_retryable: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: Display,
{
    let mut attempt: u32 = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if !is_retryable(&error) || attempt >= policy.max_attempts {
                    return Err(error);
                }

                let delay = policy.delay_for(attempt);
                warn!(
                    operation = operation_name,
                    attempt = attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %error,
                    "Operation failed, retrying"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::time::Duration;

    #[derive(Debug, thiserror::Error)]
    #[error("{message}")]
    struct TestError {
        message: String,
        retryable: bool,
    }

    fn transient(message: &str) -> TestError {
        TestError {
            message: message.to_string(),
            retryable: true,
        }
    }

    fn terminal(message: &str) -> TestError {
        TestError {
            message: message.to_string(),
            retryable: false,
        }
    }

    #[tokio::test]
    async fn test_first_attempt_success_runs_once() {
        let policy = RetryPolicy::fixed(5, Duration::ZERO);
        let calls = Cell::new(0u32);

        let result: Result<&str, TestError> = with_retry(&policy, "open", |e: &TestError| e.retryable, || {
            calls.set(calls.get() + 1);
            async { Ok("done") }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_transient_failures_then_success() {
        let policy = RetryPolicy::fixed(10, Duration::ZERO);
        let calls = Cell::new(0u32);

        let result: Result<u32, TestError> = with_retry(&policy, "open", |e: &TestError| e.retryable, || {
            let attempt = calls.get() + 1;
            calls.set(attempt);
            async move {
                if attempt <= 3 {
                    Err(transient("connection reset"))
                } else {
                    Ok(42)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.get(), 4);
    }

    #[tokio::test]
    async fn test_exhausted_policy_returns_last_error() {
        let policy = RetryPolicy::fixed(3, Duration::ZERO);
        let calls = Cell::new(0u32);

        let result: Result<(), TestError> = with_retry(&policy, "open", |e: &TestError| e.retryable, || {
            calls.set(calls.get() + 1);
            async { Err(transient("still unreachable")) }
        })
        .await;

        let error = result.unwrap_err();
        assert_eq!(calls.get(), 3);
        assert!(error.retryable);
        assert_eq!(error.to_string(), "still unreachable");
    }

    #[tokio::test]
    async fn test_terminal_error_is_not_retried() {
        let policy = RetryPolicy::fixed(10, Duration::ZERO);
        let calls = Cell::new(0u32);

        let result: Result<(), TestError> = with_retry(&policy, "open", |e: &TestError| e.retryable, || {
            calls.set(calls.get() + 1);
            async { Err(terminal("permission denied")) }
        })
        .await;

        let error = result.unwrap_err();
        assert_eq!(calls.get(), 1);
        assert_eq!(error.to_string(), "permission denied");
    }

    #[tokio::test]
    async fn test_zero_attempt_policy_still_runs_once() {
        let policy = RetryPolicy::fixed(0, Duration::ZERO);
        let calls = Cell::new(0u32);

        let result: Result<(), TestError> = with_retry(&policy, "open", |e: &TestError| e.retryable, || {
            calls.set(calls.get() + 1);
            async { Err(transient("transient")) }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.get(), 1);
    }
}
