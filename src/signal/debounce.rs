//! Debounce combinator for notification streams

use futures_util::Stream;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::time::{sleep, Sleep};

/// Stream combinator that holds the newest item until `delay` has elapsed
/// with nothing newer arriving. A newer item replaces the held one and
/// restarts the window, so a burst of changes collapses to its final value.
///
/// A zero delay still schedules through the timer, which means a burst
/// observed in a single poll also collapses to its last value.
pub struct Debounce<S: Stream> {
    inner: S,
    delay: Duration,
    held: Option<S::Item>,
    timer: Option<Pin<Box<Sleep>>>,
    exhausted: bool,
}

impl<S: Stream> Debounce<S> {
    pub(crate) fn new(inner: S, delay: Duration) -> Self {
        Self {
            inner,
            delay,
            held: None,
            timer: None,
            exhausted: false,
        }
    }
}

impl<S> Stream for Debounce<S>
where
    S: Stream + Unpin,
    S::Item: Unpin,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();

        // Drain everything the source has ready; the newest item wins and
        // restarts the window.
        while !this.exhausted {
            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    this.held = Some(item);
                    this.timer = Some(Box::pin(sleep(this.delay)));
                }
                Poll::Ready(None) => this.exhausted = true,
                Poll::Pending => break,
            }
        }

        if let Some(timer) = this.timer.as_mut() {
            match timer.as_mut().poll(cx) {
                Poll::Ready(()) => {
                    this.timer = None;
                    if let Some(item) = this.held.take() {
                        return Poll::Ready(Some(item));
                    }
                }
                Poll::Pending => return Poll::Pending,
            }
        }

        if this.exhausted {
            Poll::Ready(None)
        } else {
            Poll::Pending
        }
    }
}
