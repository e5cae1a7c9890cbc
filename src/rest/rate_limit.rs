//! Call-limit backoff.
//!
//! Shopify reports bucket usage on every response in the
//! `X-Shopify-Shop-Api-Call-Limit` header. Once the last reported usage
//! reaches the backoff threshold, each new call is queued and delayed by
//! 500ms times the current queue depth, so concurrent calls fan out in 500ms
//! steps while the bucket drains.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::clients::ApiCallLimit;
use crate::rest::ApiError;

/// Delay added per queued call.
pub const QUEUE_STEP: Duration = Duration::from_millis(500);

/// Per-client call-limit state.
///
/// # Example
///
/// ```rust
/// use shopify_client::rest::RateLimiter;
///
/// let limiter = RateLimiter::new(35);
/// limiter.observe(Some("36/40"));
/// assert_eq!(limiter.last_usage(), 36);
/// assert!(limiter.must_wait());
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    backoff: u32,
    last_usage: AtomicU32,
    queue_depth: AtomicU32,
}

// Holds one queue slot; released on drop so cancelled waits free it too.
struct QueueSlot<'a>(&'a AtomicU32);

impl Drop for QueueSlot<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl RateLimiter {
    /// Creates a limiter that starts delaying at `backoff`.
    #[must_use]
    pub const fn new(backoff: u32) -> Self {
        Self {
            backoff,
            last_usage: AtomicU32::new(0),
            queue_depth: AtomicU32::new(0),
        }
    }

    /// Returns the backoff threshold.
    #[must_use]
    pub const fn backoff(&self) -> u32 {
        self.backoff
    }

    /// Returns the last usage reported by the API.
    #[must_use]
    pub fn last_usage(&self) -> u32 {
        self.last_usage.load(Ordering::SeqCst)
    }

    /// Returns the number of calls currently delayed.
    #[must_use]
    pub fn queue_depth(&self) -> u32 {
        self.queue_depth.load(Ordering::SeqCst)
    }

    /// Returns `true` if a call made now would be delayed.
    #[must_use]
    pub fn must_wait(&self) -> bool {
        self.last_usage() >= self.backoff
    }

    /// Records the call-limit header of a completed response.
    ///
    /// Absent headers are ignored. Unparseable values are logged and
    /// ignored.
    pub fn observe(&self, header: Option<&str>) {
        let Some(raw) = header else {
            return;
        };

        match ApiCallLimit::parse(raw) {
            Some(limit) => self.last_usage.store(limit.request_count, Ordering::SeqCst),
            None => tracing::warn!(value = raw, "ignoring unparseable call-limit header"),
        }
    }

    /// Marks the bucket as full after a throttled response, so the retry is
    /// delayed even when the response carried no usable call-limit header.
    pub fn note_throttled(&self) {
        self.last_usage.fetch_max(self.backoff, Ordering::SeqCst);
    }

    /// Waits until a call may proceed.
    ///
    /// Returns immediately below the threshold. Otherwise takes a queue slot
    /// and sleeps for [`QUEUE_STEP`] times the resulting queue depth.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Cancelled`] if `cancel` fires while waiting.
    pub async fn acquire(&self, cancel: &CancellationToken) -> Result<(), ApiError> {
        if !self.must_wait() {
            return Ok(());
        }

        let depth = self.queue_depth.fetch_add(1, Ordering::SeqCst) + 1;
        let _slot = QueueSlot(&self.queue_depth);
        let delay = QUEUE_STEP * depth;

        tracing::debug!(
            usage = self.last_usage(),
            backoff = self.backoff,
            queue_depth = depth,
            delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
            "call limit reached, delaying request"
        );

        tokio::select! {
            () = cancel.cancelled() => Err(ApiError::Cancelled),
            () = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

// Verify RateLimiter is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RateLimiter>();
};
