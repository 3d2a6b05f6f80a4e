//! Manual spinner visibility control
//!
//! A show/hide channel not tied to HTTP activity. The stream end is merged
//! with the tracker's busy signal by the spinner widget; the handle end
//! lives wherever the application decides to force the spinner on or off.

use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

/// Stream of manual visibility values consumed by the spinner widget
pub type VisibilityStream = UnboundedReceiverStream<bool>;

/// Create a manual visibility channel.
///
/// An untouched channel contributes nothing, so the widget resolves its
/// initial state from the pending stream alone.
pub fn channel() -> (SpinnerVisibility, VisibilityStream) {
    let (tx, rx) = mpsc::unbounded_channel();
    (SpinnerVisibility { tx }, UnboundedReceiverStream::new(rx))
}

/// Handle for forcing the spinner visible or hidden.
#[derive(Debug, Clone)]
pub struct SpinnerVisibility {
    tx: mpsc::UnboundedSender<bool>,
}

impl SpinnerVisibility {
    /// Force the spinner visible.
    pub fn show(&self) {
        let _ = self.tx.send(true);
    }

    /// Force the spinner hidden.
    pub fn hide(&self) {
        let _ = self.tx.send(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn test_show_and_hide_emit_in_order() {
        let (handle, mut stream) = channel();
        handle.show();
        handle.hide();
        handle.show();

        assert_eq!(stream.next().await, Some(true));
        assert_eq!(stream.next().await, Some(false));
        assert_eq!(stream.next().await, Some(true));
    }

    #[tokio::test]
    async fn test_cloned_handles_share_the_channel() {
        let (handle, mut stream) = channel();
        let other = handle.clone();

        other.show();
        drop(handle);
        drop(other);

        assert_eq!(stream.next().await, Some(true));
        assert_eq!(stream.next().await, None);
    }
}
