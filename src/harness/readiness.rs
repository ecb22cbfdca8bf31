//! 就绪轮询器
//!
//! Blocks the calling thread until an HTTP endpoint answers with a success
//! status, or gives up once the time budget is spent. Attempts start at a
//! fixed cadence of one interval. A single attempt never runs longer than one
//! interval, and nothing runs past the deadline, so:
//! - an unreachable endpoint is reported no earlier than the timeout and no
//!   later than one interval after it;
//! - an endpoint that comes up is detected within one interval, even when an
//!   earlier attempt hung without a reply.

use reqwest::blocking::Client;
use reqwest::Url;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Successful wait
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readiness {
    /// Requests issued, including the successful one
    pub attempts: u32,
    pub elapsed: Duration,
}

#[derive(Debug, Error)]
pub enum ReadinessError {
    #[error("{url} did not become ready within {timeout:?} ({attempts} attempts, last error: {last_error})")]
    Unreachable {
        url: String,
        timeout: Duration,
        attempts: u32,
        elapsed: Duration,
        last_error: String,
    },

    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("polling interval must be greater than zero")]
    ZeroInterval,

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct ReadinessPoller {
    client: Client,
    timeout: Duration,
    interval: Duration,
    expect_json: bool,
}

impl ReadinessPoller {
    pub fn new(timeout: Duration, interval: Duration) -> Result<Self, ReadinessError> {
        if interval.is_zero() {
            return Err(ReadinessError::ZeroInterval);
        }
        let client = Client::builder().build()?;

        Ok(Self {
            client,
            timeout,
            interval,
            expect_json: false,
        })
    }

    /// Only count a response as ready when its body parses as JSON.
    pub fn expect_json(mut self, expect_json: bool) -> Self {
        self.expect_json = expect_json;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Polls `url` until it is ready or the deadline passes.
    pub fn wait(&self, url: &str) -> Result<Readiness, ReadinessError> {
        let target = Url::parse(url).map_err(|e| ReadinessError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let started = Instant::now();
        let deadline = started + self.timeout;
        let mut attempts = 0u32;
        let mut last_error = String::from("no attempt made");

        info!(
            %url,
            timeout_ms = self.timeout.as_millis() as u64,
            interval_ms = self.interval.as_millis() as u64,
            "Waiting for endpoint"
        );

        loop {
            let attempt_started = Instant::now();
            if attempt_started >= deadline {
                break;
            }

            attempts += 1;
            let budget = self.interval.min(deadline - attempt_started);
            match self.attempt(target.clone(), budget) {
                Ok(()) => {
                    let elapsed = started.elapsed();
                    info!(%url, attempts, elapsed_ms = elapsed.as_millis() as u64, "Endpoint is ready");
                    return Ok(Readiness { attempts, elapsed });
                }
                Err(reason) => {
                    debug!(%url, attempts, %reason, "Endpoint not ready");
                    last_error = reason;
                }
            }

            let next_attempt = (attempt_started + self.interval).min(deadline);
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            if next_attempt > now {
                thread::sleep(next_attempt - now);
            }
        }

        let elapsed = started.elapsed();
        warn!(%url, attempts, %last_error, "Endpoint did not become ready");
        Err(ReadinessError::Unreachable {
            url: url.to_string(),
            timeout: self.timeout,
            attempts,
            elapsed,
            last_error,
        })
    }

    /// One GET, bounded by `budget` from connect to the end of the body.
    fn attempt(&self, url: Url, budget: Duration) -> Result<(), String> {
        let response = self
            .client
            .get(url)
            .timeout(budget)
            .send()
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("status {status}"));
        }
        if self.expect_json {
            response
                .json::<serde_json::Value>()
                .map_err(|e| format!("invalid json body: {e}"))?;
        }
        Ok(())
    }
}
