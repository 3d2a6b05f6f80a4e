//! Pending-request tracking for the HTTP pipeline
//!
//! Counts the requests currently in flight and publishes a boolean busy
//! signal whenever the count crosses zero. Requests whose URL matches a
//! registered exclusion pattern bypass tracking entirely.

use crate::signal::{DistinctUntilChanged, SignalStreamExt};
use regex::Regex;
use std::future::Future;
use std::sync::{Arc, Mutex, RwLock};
use thiserror::Error;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::debug;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("invalid exclusion pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Replay-latest busy stream with consecutive duplicates suppressed.
///
/// A new subscriber immediately receives the current state, then only
/// genuine transitions.
pub type PendingStatus = DistinctUntilChanged<WatchStream<bool>>;

/// Tracks outstanding HTTP requests and publishes a busy signal.
///
/// Cloning is cheap; clones share the same counter, exclusion set, and
/// status channel.
#[derive(Debug, Clone)]
pub struct PendingTracker {
    inner: Arc<TrackerInner>,
}

#[derive(Debug)]
struct TrackerInner {
    /// Requests in flight. Never goes below zero: every decrement is paired
    /// with a prior increment through [`PendingGuard`].
    pending: Mutex<usize>,
    /// Ordered exclusion set; registration is additive only.
    patterns: RwLock<Vec<Regex>>,
    status_tx: watch::Sender<bool>,
}

impl PendingTracker {
    pub fn new() -> Self {
        let (status_tx, _status_rx) = watch::channel(false);
        Self {
            inner: Arc::new(TrackerInner {
                pending: Mutex::new(0),
                patterns: RwLock::new(Vec::new()),
                status_tx,
            }),
        }
    }

    /// Number of requests currently in flight.
    pub fn pending_requests(&self) -> usize {
        *self.inner.pending.lock().expect("lock poisoned")
    }

    /// Compile `pattern` and append it to the exclusion set.
    ///
    /// Requests whose URL matches any registered pattern are never counted.
    /// A malformed pattern fails here, synchronously, and registers nothing.
    pub fn register_exclusion_pattern(&self, pattern: &str) -> Result<(), TrackError> {
        let compiled = Regex::new(pattern)?;
        self.inner
            .patterns
            .write()
            .expect("lock poisoned")
            .push(compiled);
        Ok(())
    }

    fn should_bypass(&self, url: &str) -> bool {
        self.inner
            .patterns
            .read()
            .expect("lock poisoned")
            .iter()
            .any(|pattern| pattern.is_match(url))
    }

    /// Begin tracking one request.
    ///
    /// Returns `None` when `url` matches an exclusion pattern. Otherwise the
    /// count goes up (publishing `true` on the first zero crossing) and comes
    /// back down when the returned guard drops.
    pub fn begin(&self, url: &str) -> Option<PendingGuard> {
        if self.should_bypass(url) {
            debug!(url, "request bypasses pending tracking");
            return None;
        }
        self.inner.begin_one();
        Some(PendingGuard {
            inner: Arc::clone(&self.inner),
        })
    }

    /// Run `next` with pending tracking applied.
    ///
    /// Excluded URLs are forwarded untouched, with no counting side effect.
    /// Otherwise the count is incremented before `next` runs and decremented
    /// exactly once when it resolves or is dropped mid-flight; an error is
    /// returned unchanged after the decrement has run.
    pub async fn track<F, T, E>(&self, url: &str, next: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
    {
        let guard = match self.begin(url) {
            Some(guard) => guard,
            None => return next.await,
        };
        let result = next.await;
        drop(guard);
        result
    }

    /// The busy signal as a replay-latest stream.
    pub fn pending_status(&self) -> PendingStatus {
        WatchStream::new(self.inner.status_tx.subscribe()).distinct_until_changed()
    }

    /// Raw channel access for hosts that prefer `changed()` loops over
    /// streams.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.inner.status_tx.subscribe()
    }
}

impl Default for PendingTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackerInner {
    fn begin_one(&self) {
        let mut pending = self.pending.lock().expect("lock poisoned");
        *pending += 1;
        debug!(pending = *pending, "request started");
        // Publishing under the count lock keeps transitions atomic with
        // their emissions; send_if_modified suppresses duplicates at the
        // source, so only the 0 -> 1 crossing notifies.
        self.status_tx.send_if_modified(|busy| {
            if *busy {
                false
            } else {
                *busy = true;
                true
            }
        });
    }

    fn finish_one(&self) {
        let mut pending = self.pending.lock().expect("lock poisoned");
        *pending = pending.saturating_sub(1);
        debug!(pending = *pending, "request finished");
        if *pending == 0 {
            self.status_tx.send_if_modified(|busy| {
                if *busy {
                    *busy = false;
                    true
                } else {
                    false
                }
            });
        }
    }
}

/// RAII handle for one in-flight request.
///
/// Dropping it runs the decrement, whether the request succeeded, failed,
/// or was cancelled mid-flight.
pub struct PendingGuard {
    inner: Arc<TrackerInner>,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.inner.finish_one();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use std::time::Duration;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn test_count_follows_starts_and_completions() {
        let tracker = PendingTracker::new();
        let a = tracker.begin("https://api.example.com/a").unwrap();
        let b = tracker.begin("https://api.example.com/b").unwrap();
        assert_eq!(tracker.pending_requests(), 2);
        drop(a);
        assert_eq!(tracker.pending_requests(), 1);
        drop(b);
        assert_eq!(tracker.pending_requests(), 0);
    }

    #[tokio::test]
    async fn test_overlapping_requests_emit_one_transition_pair() {
        // start A -> true, start B silent, A fails silent, B ends -> false
        let tracker = PendingTracker::new();
        let mut status = tracker.pending_status();
        assert_eq!(status.next().await, Some(false));

        let a = tracker.begin("https://api.example.com/a").unwrap();
        assert_eq!(status.next().now_or_never().flatten(), Some(true));

        let b = tracker.begin("https://api.example.com/b").unwrap();
        assert!(status.next().now_or_never().is_none());

        drop(a);
        assert!(status.next().now_or_never().is_none());

        drop(b);
        assert_eq!(status.next().now_or_never().flatten(), Some(false));
    }

    #[tokio::test]
    async fn test_duplicate_starts_do_not_renotify() {
        let tracker = PendingTracker::new();
        let mut rx = tracker.subscribe();

        let _a = tracker.begin("https://api.example.com/a").unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(*rx.borrow_and_update());

        let _b = tracker.begin("https://api.example.com/b").unwrap();
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_excluded_url_is_never_counted() {
        let tracker = PendingTracker::new();
        tracker
            .register_exclusion_pattern(r"^https://health\.")
            .unwrap();
        let mut status = tracker.pending_status();
        assert_eq!(status.next().await, Some(false));

        assert!(tracker.begin("https://health.example.com/ping").is_none());
        assert_eq!(tracker.pending_requests(), 0);
        assert!(status.next().now_or_never().is_none());

        let result: Result<&str, &str> = tracker
            .track("https://health.example.com/ping", async { Ok("pong") })
            .await;
        assert_eq!(result, Ok("pong"));
        assert_eq!(tracker.pending_requests(), 0);
        assert!(status.next().now_or_never().is_none());
    }

    #[tokio::test]
    async fn test_invalid_pattern_fails_registration() {
        let tracker = PendingTracker::new();
        let err = tracker.register_exclusion_pattern("(unclosed").unwrap_err();
        assert!(matches!(err, TrackError::Pattern(_)));
        // the failed registration left the set unchanged
        let guard = tracker.begin("(unclosed");
        assert!(guard.is_some());
    }

    #[tokio::test]
    async fn test_error_passes_through_after_decrement() {
        let tracker = PendingTracker::new();
        let result: Result<(), &str> = tracker
            .track("https://api.example.com/fail", async { Err("boom") })
            .await;
        assert_eq!(result, Err("boom"));
        assert_eq!(tracker.pending_requests(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_request_still_decrements() {
        let tracker = PendingTracker::new();
        let mut fut = Box::pin(tracker.track("https://api.example.com/slow", async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok::<_, ()>(())
        }));

        assert!((&mut fut).now_or_never().is_none());
        assert_eq!(tracker.pending_requests(), 1);

        drop(fut);
        assert_eq!(tracker.pending_requests(), 0);
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_current_state() {
        let tracker = PendingTracker::new();
        let _guard = tracker.begin("https://api.example.com/a").unwrap();

        let mut status = tracker.pending_status();
        assert_eq!(status.next().await, Some(true));
    }

    #[tokio::test]
    async fn test_many_concurrent_requests_settle_to_zero() {
        let tracker = PendingTracker::new();
        let mut handles = Vec::new();
        for i in 0u64..16 {
            let tracker = tracker.clone();
            handles.push(tokio::spawn(async move {
                let url = format!("https://api.example.com/items/{i}");
                tracker
                    .track::<_, _, ()>(&url, async move {
                        tokio::time::sleep(Duration::from_millis(i % 4)).await;
                        Ok(())
                    })
                    .await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        assert_eq!(tracker.pending_requests(), 0);
        assert!(!*tracker.subscribe().borrow());
    }
}
