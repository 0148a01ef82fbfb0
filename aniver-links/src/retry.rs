// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Retry utilities with exponential backoff for backend lookups.
///
/// Only errors for which [`Error::is_retryable`] holds trigger another
/// attempt. An operation that completes with a definite answer (including
/// "no row") is returned immediately, and an attempt that reports
/// [`Error::Superseded`] ends the loop without further backend calls.
use std::{future::Future, time::Duration};

use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::Error;

/// Configuration for retry behavior with exponential backoff.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize,)]
#[serde(default, deny_unknown_fields)]
pub struct RetryConfig
{
    /// Maximum number of attempts including the first one (default: 2).
    pub max_attempts:     u32,
    /// Initial delay between attempts in milliseconds (default: 200).
    pub initial_delay_ms: u64,
    /// Multiplier for exponential backoff (default: 2.0).
    pub backoff_factor:   f64,
}

impl Default for RetryConfig
{
    fn default() -> Self
    {
        Self {
            max_attempts: 2, initial_delay_ms: 200, backoff_factor: 2.0,
        }
    }
}

impl RetryConfig
{
    /// Delay before the attempt following `attempt` (1-based).
    fn delay_after(&self, attempt: u32,) -> Duration
    {
        let factor = self.backoff_factor.powi(attempt.saturating_sub(1,) as i32,);
        Duration::from_millis((self.initial_delay_ms as f64 * factor) as u64,)
    }
}

/// Executes an async operation with exponential backoff retry logic.
///
/// The operation is invoked again only while it fails with a retryable
/// error and attempts remain. Callers that may lose interest between
/// attempts check for it inside `f` and return [`Error::Superseded`].
///
/// # Errors
///
/// Returns the first non-retryable error, or the last error once all
/// attempts are spent.
///
/// # Example
///
/// ```no_run
/// use aniver_links::{Error, RetryConfig, retry_with_backoff};
///
/// # async fn example() -> Result<(), Error> {
/// let config = RetryConfig::default();
/// let result = retry_with_backoff(&config, "lookup establishment", || async {
///     Ok::<_, Error,>(42,)
/// },)
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn retry_with_backoff<F, Fut, T,>(
    config: &RetryConfig,
    operation: &str,
    mut f: F,
) -> Result<T, Error,>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error,>,>,
{
    let max_attempts = config.max_attempts.max(1,);
    let mut attempt = 1;

    loop {
        let error = match f().await {
            Ok(result,) => {
                if attempt > 1 {
                    debug!(operation, attempt, "succeeded after retry");
                }
                return Ok(result,);
            }
            Err(error,) => error,
        };

        if !error.is_retryable() {
            debug!(operation, attempt, error = %error, "not retrying");
            return Err(error,);
        }
        if attempt >= max_attempts {
            warn!(operation, attempts = max_attempts, error = %error, "giving up");
            return Err(error,);
        }

        let delay = config.delay_after(attempt,);
        warn!(
            operation,
            attempt,
            max_attempts,
            error = %error,
            delay_ms = delay.as_millis() as u64,
            "attempt failed, retrying"
        );
        sleep(delay,).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests
{
    use std::sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    };

    use super::*;

    fn quick(max_attempts: u32,) -> RetryConfig
    {
        RetryConfig {
            max_attempts, initial_delay_ms: 1, backoff_factor: 2.0,
        }
    }

    /// Runs `retry_with_backoff` over a scripted sequence of results and
    /// returns the outcome with the number of attempts made.
    async fn run_script(
        config: &RetryConfig,
        script: Vec<Result<Option<u32,>, Error,>,>,
    ) -> (Result<Option<u32,>, Error,>, u32,)
    {
        let calls = Arc::new(AtomicU32::new(0,),);
        let script = Arc::new(std::sync::Mutex::new(script.into_iter(),),);
        let counter = calls.clone();

        let result = retry_with_backoff(config, "establishment lookup", move || {
            counter.fetch_add(1, Ordering::SeqCst,);
            let next = script.lock().unwrap().next().unwrap_or(Ok(None,),);
            async move { next }
        },)
        .await;

        (result, calls.load(Ordering::SeqCst,),)
    }

    #[test]
    fn retry_config_default_allows_one_retry()
    {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 2);
        assert_eq!(config.initial_delay_ms, 200);
        assert_eq!(config.backoff_factor, 2.0);
    }

    #[test]
    fn delay_grows_by_backoff_factor()
    {
        let config =
            RetryConfig {
                max_attempts: 4, initial_delay_ms: 100, backoff_factor: 3.0,
            };
        assert_eq!(config.delay_after(1,), Duration::from_millis(100,));
        assert_eq!(config.delay_after(2,), Duration::from_millis(300,));
        assert_eq!(config.delay_after(3,), Duration::from_millis(900,));
    }

    #[tokio::test]
    async fn missing_row_is_not_retried()
    {
        let (result, calls,) = run_script(&quick(3,), vec![Ok(None,)],).await;
        assert!(matches!(result, Ok(None)));
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn backend_failure_is_retried_until_success()
    {
        let script = vec![Err(Error::lookup("reset",),), Err(Error::lookup("reset",),), Ok(Some(7,),)];
        let (result, calls,) = run_script(&quick(3,), script,).await;
        assert!(matches!(result, Ok(Some(7))));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn backend_failure_stops_at_max_attempts()
    {
        let script = (0..5).map(|_| Err(Error::lookup("down",),),).collect();
        let (result, calls,) = run_script(&quick(2,), script,).await;
        assert!(matches!(result, Err(Error::Lookup { .. })));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn superseded_attempt_ends_the_loop()
    {
        let script = vec![Err(Error::lookup("down",),), Err(Error::Superseded,)];
        let (result, calls,) = run_script(&quick(5,), script,).await;
        assert!(matches!(result, Err(Error::Superseded)));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn zero_attempts_still_runs_once()
    {
        let (result, calls,) =
            run_script(&quick(0,), vec![Err(Error::lookup("down",),), Ok(Some(1,),)],).await;
        assert!(result.is_err());
        assert_eq!(calls, 1);
    }
}
