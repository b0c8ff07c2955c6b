//! Rate limiting for Canvas API reads
//!
//! The design service enforces a per-token request budget, so all remote
//! reads share a single [`RequestGate`] for the lifetime of the process.
//! The gate applies uniformly across endpoints and across concurrent
//! in-flight batches; it is the only serialization point for reads.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use drawbridge_remote::rate_limit::RequestGate;
//!
//! # async fn example() {
//! let gate = Arc::new(RequestGate::new(4));
//! gate.acquire().await;
//! // ... make API call ...
//! # }
//! ```

use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

use tracing::debug;

/// Internal mutable state for the token bucket, protected by a Mutex.
#[derive(Debug)]
struct GateInner {
    /// Current number of available tokens (fractional for smooth refill)
    tokens: f64,
    /// Timestamp of the last refill calculation
    last_refill: Instant,
}

/// Token bucket gating all outbound reads to the design service
///
/// Tokens refill at `requests_per_second` per second, with a burst
/// capacity of the same size. The bucket starts full so the first cycle
/// is not artificially delayed. Thread safety is provided by an internal
/// `Mutex<GateInner>`; share the gate via `Arc<RequestGate>`.
#[derive(Debug)]
pub struct RequestGate {
    /// Maximum number of tokens (burst size)
    capacity: u32,
    /// Rate at which tokens are added (tokens per second)
    refill_rate: f64,
    /// Mutable inner state (token count, last refill time)
    inner: Mutex<GateInner>,
}

impl RequestGate {
    /// Creates a gate allowing `requests_per_second` reads per second
    pub fn new(requests_per_second: u32) -> Self {
        Self {
            capacity: requests_per_second,
            refill_rate: f64::from(requests_per_second),
            inner: Mutex::new(GateInner {
                tokens: f64::from(requests_per_second),
                last_refill: Instant::now(),
            }),
        }
    }

    /// Refills the bucket based on elapsed time since last refill.
    ///
    /// Caps at the configured capacity. Called internally before every
    /// availability check.
    fn refill(inner: &mut GateInner, refill_rate: f64, capacity: u32) {
        let now = Instant::now();
        let elapsed_secs = now.duration_since(inner.last_refill).as_secs_f64();

        if elapsed_secs > 0.0 {
            let new_tokens = elapsed_secs * refill_rate;
            inner.tokens = (inner.tokens + new_tokens).min(f64::from(capacity));
            inner.last_refill = now;
        }
    }

    /// Attempts to acquire a single token without waiting.
    ///
    /// Refills first based on elapsed time, then checks if at least 1.0
    /// token is available. If so, subtracts 1.0 and returns `true`.
    pub fn try_acquire(&self) -> bool {
        let mut inner = self.inner.lock().unwrap();
        Self::refill(&mut inner, self.refill_rate, self.capacity);

        if inner.tokens >= 1.0 {
            inner.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Returns the estimated wait time in seconds until a token is available.
    pub fn time_until_available(&self) -> f64 {
        let mut inner = self.inner.lock().unwrap();
        Self::refill(&mut inner, self.refill_rate, self.capacity);

        if inner.tokens >= 1.0 {
            0.0
        } else {
            let deficit = 1.0 - inner.tokens;
            deficit / self.refill_rate
        }
    }

    /// Acquires a token, waiting for refill if none is available.
    ///
    /// This method is async and yields to the tokio runtime while waiting.
    pub async fn acquire(&self) {
        loop {
            if self.try_acquire() {
                return;
            }

            let wait_secs = self.time_until_available();
            let wait = Duration::from_secs_f64(wait_secs.max(0.01));
            debug!(
                wait_ms = wait.as_millis() as u64,
                "Request gate exhausted, waiting for refill"
            );
            tokio::time::sleep(wait).await;
        }
    }

    /// Current available tokens (after refill), for observability.
    pub fn available_tokens(&self) -> f64 {
        let mut inner = self.inner.lock().unwrap();
        Self::refill(&mut inner, self.refill_rate, self.capacity);
        inner.tokens
    }

    /// The configured burst capacity.
    pub fn capacity(&self) -> u32 {
        self.capacity
    }
}
