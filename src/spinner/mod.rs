//! Spinner display widget
//!
//! Merges the tracker's busy signal with the manual visibility override,
//! debounces the combination, and drives a render target with the resulting
//! visible/hidden state.

mod render;
mod style;

pub use render::{SpinnerRender, TerminalSpinner};
pub use style::SpinnerStyle;

use crate::signal::SignalStreamExt;
use crate::tracker::{PendingTracker, TrackError};
use crate::visibility::VisibilityStream;
use render::NullRender;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::StreamExt;
use tracing::debug;

/// Spinner widget bound to a pending tracker and a manual override stream.
///
/// The widget has two states, hidden and visible, and no terminal state: it
/// lives until dropped, which stops the background task.
pub struct Spinner {
    style: SpinnerStyle,
    visible_rx: watch::Receiver<bool>,
    task: JoinHandle<()>,
}

impl Spinner {
    pub fn builder() -> SpinnerBuilder {
        SpinnerBuilder::new()
    }

    /// Effective style, after the alternate-render rule has been applied.
    pub fn style(&self) -> SpinnerStyle {
        self.style
    }

    /// Current visibility.
    pub fn is_visible(&self) -> bool {
        *self.visible_rx.borrow()
    }

    /// The combined, debounced signal: the only value a rendering layer
    /// needs to decide show/hide.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.visible_rx.clone()
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Configuration inputs for the spinner widget
pub struct SpinnerBuilder {
    style: SpinnerStyle,
    background_color: Option<String>,
    filtered_url_patterns: Vec<String>,
    debounce_delay: Duration,
    entry_component: Option<Box<dyn SpinnerRender>>,
}

impl SpinnerBuilder {
    fn new() -> Self {
        Self {
            style: SpinnerStyle::default(),
            background_color: None,
            filtered_url_patterns: Vec::new(),
            debounce_delay: Duration::ZERO,
            entry_component: None,
        }
    }

    /// Built-in graphic to draw; [`SpinnerStyle::None`] draws nothing.
    pub fn style(mut self, style: SpinnerStyle) -> Self {
        self.style = style;
        self
    }

    /// Free-form color token for the built-in graphic.
    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// URL patterns whose requests never affect the spinner; registered
    /// with the tracker at spawn.
    pub fn filtered_url_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filtered_url_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Quiet window applied to the combined signal before rendering.
    pub fn debounce_delay(mut self, delay: Duration) -> Self {
        self.debounce_delay = delay;
        self
    }

    /// Alternate render target. Setting one suppresses the built-in
    /// graphic: the target is responsible for its own visual representation.
    pub fn entry_component(mut self, render: Box<dyn SpinnerRender>) -> Self {
        self.entry_component = Some(render);
        self
    }

    /// Register the filtered patterns with `tracker` and start the widget.
    ///
    /// Must be called from within a tokio runtime. A pattern that fails to
    /// compile fails the spawn; patterns registered before the failure stay
    /// registered.
    pub fn spawn(
        self,
        tracker: &PendingTracker,
        visibility: VisibilityStream,
    ) -> Result<Spinner, TrackError> {
        // The alternate target draws itself; the built-in graphic is forced
        // off before first render.
        let style = if self.entry_component.is_some() {
            SpinnerStyle::None
        } else {
            self.style
        };

        for pattern in &self.filtered_url_patterns {
            tracker.register_exclusion_pattern(pattern)?;
        }

        let mut render: Box<dyn SpinnerRender> = match self.entry_component {
            Some(render) => render,
            None if style == SpinnerStyle::None => Box::new(NullRender),
            None => Box::new(TerminalSpinner::new(style, self.background_color)),
        };

        let (visible_tx, visible_rx) = watch::channel(false);
        let mut combined = tracker
            .pending_status()
            .merge(visibility)
            .debounce(self.debounce_delay);

        let task = tokio::spawn(async move {
            let mut visible = false;
            while let Some(next) = combined.next().await {
                if next == visible {
                    continue;
                }
                visible = next;
                debug!(visible, "spinner visibility changed");
                if visible {
                    render.show();
                } else {
                    render.hide();
                }
                let _ = visible_tx.send(visible);
            }
        });

        Ok(Spinner {
            style,
            visible_rx,
            task,
        })
    }
}
