//! http-loader - Show a loading spinner while HTTP requests are in flight
//!
//! This library counts the HTTP requests currently outstanding in a request
//! pipeline and turns that count into a boolean busy signal. A spinner widget
//! merges the signal with a caller-driven manual override, debounces the
//! combination, and drives a terminal renderer (or one supplied by the host).
//!
//! ## Key Features
//!
//! - **Request Tracking**: pending-request counter with URL exclusion patterns
//! - **Busy Signal**: replay-latest boolean stream with duplicates suppressed
//! - **Manual Override**: force the spinner visible or hidden independent of HTTP state
//! - **Display Widget**: merge + debounce + pluggable render target

pub mod client;
pub mod config;
pub mod signal;
pub mod spinner;
pub mod tracker;
pub mod visibility;

pub use client::{ReqwestHandler, RequestHandler, TrackedClient};
pub use config::{ConfigError, LoaderConfig, SpinnerSettings, TrackingSettings};
pub use signal::{Debounce, DistinctUntilChanged, SignalStreamExt};
pub use spinner::{Spinner, SpinnerBuilder, SpinnerRender, SpinnerStyle, TerminalSpinner};
pub use tracker::{PendingGuard, PendingStatus, PendingTracker, TrackError};
pub use visibility::{SpinnerVisibility, VisibilityStream};
