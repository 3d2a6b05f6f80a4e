//! Consecutive-duplicate suppression for notification streams

use futures_util::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Stream combinator that drops items equal to the previous one.
pub struct DistinctUntilChanged<S: Stream> {
    inner: S,
    last: Option<S::Item>,
}

impl<S: Stream> DistinctUntilChanged<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self { inner, last: None }
    }
}

impl<S> Stream for DistinctUntilChanged<S>
where
    S: Stream + Unpin,
    S::Item: PartialEq + Clone + Unpin,
{
    type Item = S::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            match Pin::new(&mut this.inner).poll_next(cx) {
                Poll::Ready(Some(item)) => {
                    if this.last.as_ref() == Some(&item) {
                        continue;
                    }
                    this.last = Some(item.clone());
                    return Poll::Ready(Some(item));
                }
                other => return other,
            }
        }
    }
}
