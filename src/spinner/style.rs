//! Built-in spinner styles
//!
//! Terminal renditions of the classic CSS spinner catalogue: each style is a
//! tick-frame sequence plus an interval. `None` draws nothing.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The fixed set of built-in spinner graphics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpinnerStyle {
    RotatingPlane,
    DoubleBounce,
    Wave,
    WanderingCubes,
    Pulse,
    ChasingDots,
    ThreeBounce,
    CubeGrid,
    /// No built-in graphic; the host draws its own or nothing at all.
    None,
}

impl Default for SpinnerStyle {
    fn default() -> Self {
        SpinnerStyle::CubeGrid
    }
}

impl SpinnerStyle {
    /// Tick frames for the terminal renderer.
    pub fn frames(self) -> &'static [&'static str] {
        match self {
            SpinnerStyle::RotatingPlane => &["◰", "◳", "◲", "◱"],
            SpinnerStyle::DoubleBounce => &["·", "•", "●", "•"],
            SpinnerStyle::Wave => &[
                "▁▂▃", "▂▃▄", "▃▄▅", "▄▅▆", "▅▆▇", "▆▇█", "▇█▇", "█▇▆", "▇▆▅", "▆▅▄", "▅▄▃",
                "▄▃▂", "▃▂▁", "▂▁▂",
            ],
            SpinnerStyle::WanderingCubes => &["▌", "▀", "▐", "▄"],
            SpinnerStyle::Pulse => &["█", "▓", "▒", "░", "▒", "▓"],
            SpinnerStyle::ChasingDots => &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"],
            SpinnerStyle::ThreeBounce => &["∙∙∙", "●∙∙", "∙●∙", "∙∙●"],
            SpinnerStyle::CubeGrid => &["▘", "▀", "▜", "█", "▟", "▄", "▖", " "],
            SpinnerStyle::None => &[],
        }
    }

    /// Tick interval for the terminal renderer.
    pub fn interval(self) -> Duration {
        match self {
            SpinnerStyle::Wave | SpinnerStyle::ChasingDots => Duration::from_millis(80),
            _ => Duration::from_millis(120),
        }
    }

    /// Parse the kebab-case name used in config files and env overrides.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "rotating-plane" => Some(SpinnerStyle::RotatingPlane),
            "double-bounce" => Some(SpinnerStyle::DoubleBounce),
            "wave" => Some(SpinnerStyle::Wave),
            "wandering-cubes" => Some(SpinnerStyle::WanderingCubes),
            "pulse" => Some(SpinnerStyle::Pulse),
            "chasing-dots" => Some(SpinnerStyle::ChasingDots),
            "three-bounce" => Some(SpinnerStyle::ThreeBounce),
            "cube-grid" => Some(SpinnerStyle::CubeGrid),
            "none" => Some(SpinnerStyle::None),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUILT_IN: [SpinnerStyle; 8] = [
        SpinnerStyle::RotatingPlane,
        SpinnerStyle::DoubleBounce,
        SpinnerStyle::Wave,
        SpinnerStyle::WanderingCubes,
        SpinnerStyle::Pulse,
        SpinnerStyle::ChasingDots,
        SpinnerStyle::ThreeBounce,
        SpinnerStyle::CubeGrid,
    ];

    #[test]
    fn test_built_in_styles_have_frames() {
        for style in BUILT_IN {
            assert!(!style.frames().is_empty(), "{style:?} has no frames");
            assert!(style.interval() > Duration::ZERO);
        }
        assert!(SpinnerStyle::None.frames().is_empty());
    }

    #[test]
    fn test_config_names_round_trip() {
        for style in BUILT_IN {
            let name = serde_json::to_value(style).unwrap();
            let name = name.as_str().unwrap().to_string();
            assert_eq!(SpinnerStyle::from_name(&name), Some(style));
        }
        assert_eq!(SpinnerStyle::from_name("none"), Some(SpinnerStyle::None));
        assert_eq!(SpinnerStyle::from_name("sparkles"), None);
    }

    #[test]
    fn test_default_is_cube_grid() {
        assert_eq!(SpinnerStyle::default(), SpinnerStyle::CubeGrid);
    }
}
