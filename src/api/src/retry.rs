//! Retry with exponential backoff for the table-loading step.
//!
//! The query path never retries. Only the startup load of the reference
//! tables goes through here, since it reads files that may still be
//! landing when the server starts.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Configuration for retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    pub initial_delay: Duration,
    pub max_delay: Duration,
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

impl RetryConfig {
    /// Backoff used when loading the dataset tables.
    pub fn dataset_load(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay_ms = self.initial_delay.as_millis() as f64 * self.multiplier.powi(attempt as i32);
        Duration::from_millis(delay_ms as u64).min(self.max_delay)
    }
}

/// Retry an async operation with exponential backoff.
pub async fn retry<T, E, F, Fut>(config: &RetryConfig, operation_name: &str, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;
    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 0 {
                    debug!("{} succeeded after {} retries", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) if attempt < config.max_retries => {
                let delay = config.delay_for_attempt(attempt);
                warn!(
                    "{} failed (attempt {}/{}): {}. Retrying in {:?}...",
                    operation_name,
                    attempt + 1,
                    config.max_retries + 1,
                    e,
                    delay
                );
                sleep(delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Retry a blocking operation, running each attempt on the blocking pool.
pub async fn retry_blocking<T, E, F>(
    config: &RetryConfig,
    operation_name: &str,
    operation: F,
) -> anyhow::Result<T>
where
    F: Fn() -> Result<T, E> + Send + Sync + 'static,
    T: Send + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let operation = Arc::new(operation);
    retry(config, operation_name, || {
        let operation = Arc::clone(&operation);
        async move {
            tokio::task::spawn_blocking(move || operation())
                .await?
                .map_err(anyhow::Error::from)
        }
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast(max_retries: u32) -> RetryConfig {
        RetryConfig {
            max_retries,
            initial_delay: Duration::from_millis(5),
            max_delay: Duration::from_millis(20),
            multiplier: 2.0,
        }
    }

    #[derive(Debug, thiserror::Error)]
    #[error("tables not ready")]
    struct NotReady;

    #[tokio::test]
    async fn test_blocking_succeeds_after_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let value = retry_blocking(&fast(3), "load", move || {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(NotReady)
            } else {
                Ok(7)
            }
        })
        .await
        .unwrap();

        assert_eq!(value, 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_blocking_gives_up_with_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let err = retry_blocking(&fast(2), "load", move || -> Result<(), NotReady> {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(NotReady)
        })
        .await
        .unwrap_err();

        assert_eq!(err.to_string(), "tables not ready");
        assert_eq!(calls.load(Ordering::SeqCst), 3); // first attempt + 2 retries
    }

    #[tokio::test]
    async fn test_zero_retries_runs_once() {
        let calls = AtomicU32::new(0);
        let result: Result<(), &str> = retry(&fast(0), "once", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("boom") }
        })
        .await;

        assert_eq!(result, Err("boom"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_delay_doubles_up_to_cap() {
        let config = RetryConfig::dataset_load(5);
        assert_eq!(config.max_retries, 5);
        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(250));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(500));
        assert_eq!(config.delay_for_attempt(2), Duration::from_secs(1));
        assert_eq!(config.delay_for_attempt(10), Duration::from_secs(5));
    }
}
