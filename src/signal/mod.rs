//! Notification-stream primitives for the busy signal
//!
//! The tracker and the spinner widget talk through small boolean streams.
//! Replay-latest channels come from `tokio::sync::watch`, merging from
//! `tokio_stream::StreamExt::merge`; the two combinators the stack lacks,
//! debounce and distinct-until-changed, live here.

mod debounce;
mod distinct;

pub use debounce::Debounce;
pub use distinct::DistinctUntilChanged;

use futures_util::Stream;
use std::time::Duration;

/// Combinator extensions for notification streams
pub trait SignalStreamExt: Stream {
    /// Suppress consecutive duplicate values.
    fn distinct_until_changed(self) -> DistinctUntilChanged<Self>
    where
        Self: Sized,
        Self::Item: PartialEq + Clone,
    {
        DistinctUntilChanged::new(self)
    }

    /// Forward a value only once `delay` has elapsed without a newer one
    /// arriving; the newest value always wins.
    fn debounce(self, delay: Duration) -> Debounce<Self>
    where
        Self: Sized,
    {
        Debounce::new(self, delay)
    }
}

impl<S: Stream> SignalStreamExt for S {}
