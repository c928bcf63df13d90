use std::future::Future;
use std::time::Duration;

use crate::core::error::{RequestErrorKind, TfError};

/// Specifies the backoff strategy for retrying failed requests.
#[derive(Clone, Debug, PartialEq)]
pub enum Backoff {
    /// Retry immediately.
    None,
    /// Uses a fixed delay between retries.
    Fixed(Duration),
    /// Uses an exponential delay between retries.
    /// The delay is calculated as `min(base * (factor ^ attempt), max)`.
    Exponential {
        /// The initial backoff duration.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between retries.
        max: Duration,
    },
}

impl Backoff {
    /// The delay to wait before retry number `attempt` (zero-based).
    pub fn delay(&self, attempt: u32) -> Duration {
        match self {
            Backoff::None => Duration::ZERO,
            Backoff::Fixed(d) => *d,
            Backoff::Exponential { base, factor, max } => {
                let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
                let ms = base.as_millis() as f64 * factor.powi(exp);
                let capped = ms.min(max.as_millis() as f64);
                Duration::from_millis(capped as u64)
            }
        }
    }
}

impl Default for Backoff {
    /// `1s * 2^attempt`, capped at 30s.
    fn default() -> Self {
        Backoff::Exponential {
            base: Duration::from_secs(1),
            factor: 2.0,
            max: Duration::from_secs(30),
        }
    }
}

/// Configuration for the automatic retry mechanism.
#[derive(Clone, Debug)]
pub struct RetryConfig {
    /// Enables or disables the retry mechanism.
    pub enabled: bool,
    /// The maximum number of retries to attempt. The total number of attempts will be `max_retries + 1`.
    pub max_retries: u32,
    /// The backoff strategy to use between retries.
    pub backoff: Backoff,
    /// Retry every non-success HTTP status. When `false`, only `retry_on_status` is retried.
    pub retry_on_any_status: bool,
    /// HTTP status codes that trigger a retry when `retry_on_any_status` is off.
    pub retry_on_status: Vec<u16>,
    /// Whether to retry on request timeouts.
    pub retry_on_timeout: bool,
    /// Whether to retry on connection errors.
    pub retry_on_connect: bool,
    /// Whether to retry when the body does not decode.
    pub retry_on_decode: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_retries: 3,
            backoff: Backoff::default(),
            retry_on_any_status: true,
            retry_on_status: vec![408, 429, 500, 502, 503, 504],
            retry_on_timeout: true,
            retry_on_connect: true,
            retry_on_decode: true,
        }
    }
}

impl RetryConfig {
    /// Policy used by the quote poller: any failed request is retried 3 times,
    /// `min(1000 * 2^attempt, 30000)` ms apart.
    pub fn quotes() -> Self {
        Self::default()
    }

    /// Policy used by historical and news requests: any failed request is retried twice
    /// with the default backoff.
    pub fn standard() -> Self {
        Self {
            max_retries: 2,
            ..Self::default()
        }
    }

    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Whether `err` is worth another attempt under this policy.
    pub fn should_retry(&self, err: &TfError) -> bool {
        match err.kind() {
            Some(RequestErrorKind::Transport) => self.retry_on_connect,
            Some(RequestErrorKind::Timeout) => self.retry_on_timeout,
            Some(RequestErrorKind::Decode) => self.retry_on_decode,
            Some(RequestErrorKind::Status) => {
                self.retry_on_any_status
                    || err
                        .status()
                        .is_some_and(|s| self.retry_on_status.contains(&s))
            }
            None => false,
        }
    }
}

/// Run `op` until it succeeds, the error is not retryable, or retries are exhausted.
pub(crate) async fn run<T, F, Fut>(cfg: &RetryConfig, what: &str, mut op: F) -> Result<T, TfError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, TfError>>,
{
    let mut attempt = 0u32;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) if cfg.enabled && attempt < cfg.max_retries && cfg.should_retry(&e) => {
                let delay = cfg.backoff.delay(attempt);
                tracing::debug!(
                    what,
                    attempt = attempt + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "retrying request"
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
            Err(e) => {
                if attempt > 0 {
                    tracing::warn!(what, attempts = attempt + 1, error = %e, "giving up");
                }
                return Err(e);
            }
        }
    }
}

/// Defines the behavior of the request cache for an API call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheMode {
    /// Read from the cache if a fresh entry is present; otherwise, fetch from the network
    /// and write the response to the cache. (Default)
    Use,
    /// Always fetch from the network, bypassing any cached entry, and write the new response to the cache.
    Refresh,
    /// Always fetch from the network and do not read from or write to the cache.
    Bypass,
}
