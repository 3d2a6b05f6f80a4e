//! Render targets for the spinner widget

use super::style::SpinnerStyle;
use indicatif::{ProgressBar, ProgressStyle};

/// Render target driven by the spinner widget.
///
/// The built-in implementation draws to the terminal; hosts with their own
/// chrome supply an alternate target instead.
pub trait SpinnerRender: Send + 'static {
    /// The combined signal turned true.
    fn show(&mut self);
    /// The combined signal turned false.
    fn hide(&mut self);
}

/// Built-in terminal spinner
pub struct TerminalSpinner {
    style: SpinnerStyle,
    color: Option<String>,
    bar: Option<ProgressBar>,
}

impl TerminalSpinner {
    pub fn new(style: SpinnerStyle, color: Option<String>) -> Self {
        Self {
            style,
            color,
            bar: None,
        }
    }

    fn make_bar(&self) -> ProgressBar {
        let bar = ProgressBar::new_spinner();
        let template = match &self.color {
            Some(color) => format!("  {{spinner:.{color}}}"),
            None => "  {spinner}".to_string(),
        };
        // An unparseable color token falls back to the plain spinner
        let style = ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(self.style.frames());
        bar.set_style(style);
        bar
    }
}

impl SpinnerRender for TerminalSpinner {
    fn show(&mut self) {
        if self.style.frames().is_empty() {
            return;
        }
        if self.bar.is_none() {
            let bar = self.make_bar();
            bar.enable_steady_tick(self.style.interval());
            self.bar = Some(bar);
        }
    }

    fn hide(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}

impl Drop for TerminalSpinner {
    fn drop(&mut self) {
        self.hide();
    }
}

/// Render target that draws nothing; used when the style is
/// [`SpinnerStyle::None`] and no alternate target was supplied.
pub(crate) struct NullRender;

impl SpinnerRender for NullRender {
    fn show(&mut self) {}
    fn hide(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_hide_are_idempotent() {
        let mut spinner = TerminalSpinner::new(SpinnerStyle::CubeGrid, None);
        spinner.hide();
        spinner.show();
        spinner.show();
        spinner.hide();
        spinner.hide();
    }

    #[test]
    fn test_none_style_never_draws() {
        let mut spinner = TerminalSpinner::new(SpinnerStyle::None, None);
        spinner.show();
        assert!(spinner.bar.is_none());
    }

    #[test]
    fn test_bad_color_token_falls_back() {
        let mut spinner =
            TerminalSpinner::new(SpinnerStyle::Wave, Some("not a color}".to_string()));
        spinner.show();
        spinner.hide();
    }
}
