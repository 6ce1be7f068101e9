//! Optional retry policy at the fetcher boundary.
//!
//! The pipelines never retry on their own. A fetcher built with a non-zero
//! [`RetryPolicy`] retries transient transport failures with exponential
//! backoff. HTTP 403 is never retried: it is the site's throttling signal
//! and the pipelines act on it directly.

use std::time::Duration;

use crate::error::ScraperError;

/// Maximum single backoff delay.
const MAX_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Additional attempts after the first failure. `0` disables retries.
    pub max_retries: u32,
    /// Base delay: the wait before the n-th retry is `base * 2^(n-1)` ms.
    pub backoff_base_ms: u64,
}

impl RetryPolicy {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }
}

/// Returns `true` for failures worth another attempt.
///
/// Retriable: connection/timeout failures, HTTP 429 and 5xx.
/// Not retriable: 403, other 4xx, and every non-transport error.
fn is_retriable(err: &ScraperError) -> bool {
    match err {
        ScraperError::Http(e) => e.is_timeout() || e.is_connect(),
        ScraperError::UnexpectedStatus { status, .. } => *status == 429 || *status >= 500,
        _ => false,
    }
}

/// Runs `operation`, retrying transient failures per `policy`.
pub(crate) fn retry_with_backoff<T, F>(policy: RetryPolicy, mut operation: F) -> Result<T, ScraperError>
where
    F: FnMut() -> Result<T, ScraperError>,
{
    let mut attempt = 0u32;
    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= policy.max_retries {
                    return Err(err);
                }
                attempt += 1;
                let delay_ms = policy
                    .backoff_base_ms
                    .saturating_mul(1u64 << (attempt - 1).min(16))
                    .min(MAX_DELAY_MS);
                tracing::warn!(
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms,
                    error = %err,
                    "transient fetch error, retrying after backoff"
                );
                std::thread::sleep(Duration::from_millis(delay_ms));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    fn policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy {
            max_retries,
            backoff_base_ms: 0,
        }
    }

    fn status(status: u16) -> ScraperError {
        ScraperError::UnexpectedStatus {
            status,
            url: "https://www.trustpilot.com/search?query=burger".to_owned(),
        }
    }

    #[test]
    fn succeeds_immediately_on_first_try() {
        let calls = Cell::new(0u32);
        let result = retry_with_backoff(policy(3), || {
            calls.set(calls.get() + 1);
            Ok::<u32, ScraperError>(42)
        });
        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn retries_server_errors_then_succeeds() {
        let calls = Cell::new(0u32);
        let result = retry_with_backoff(policy(3), || {
            calls.set(calls.get() + 1);
            if calls.get() < 3 {
                Err(status(503))
            } else {
                Ok("<html></html>")
            }
        });
        assert_eq!(result.unwrap(), "<html></html>");
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn propagates_last_error_after_exhausting_retries() {
        let calls = Cell::new(0u32);
        let result = retry_with_backoff(policy(2), || {
            calls.set(calls.get() + 1);
            Err::<(), _>(status(429))
        });
        // max_retries=2 → 3 total attempts
        assert_eq!(calls.get(), 3);
        assert!(matches!(
            result,
            Err(ScraperError::UnexpectedStatus { status: 429, .. })
        ));
    }

    #[test]
    fn never_retries_forbidden() {
        let calls = Cell::new(0u32);
        let result = retry_with_backoff(policy(5), || {
            calls.set(calls.get() + 1);
            Err::<(), _>(ScraperError::Forbidden {
                url: "https://www.trustpilot.com/search?query=burger".to_owned(),
            })
        });
        assert_eq!(calls.get(), 1);
        assert!(result.unwrap_err().is_forbidden());
    }

    #[test]
    fn does_not_retry_client_errors() {
        let calls = Cell::new(0u32);
        let result = retry_with_backoff(policy(5), || {
            calls.set(calls.get() + 1);
            Err::<(), _>(status(404))
        });
        assert_eq!(calls.get(), 1);
        assert!(result.is_err());
    }

    #[test]
    fn default_policy_never_retries() {
        let calls = Cell::new(0u32);
        let _ = retry_with_backoff(RetryPolicy::none(), || {
            calls.set(calls.get() + 1);
            Err::<(), _>(status(500))
        });
        assert_eq!(calls.get(), 1);
    }
}
