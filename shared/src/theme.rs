use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::{Budget, Pace, Style};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

const GOLD: Rgb = Rgb(0xff, 0xd4, 0x79);
const BLUE: Rgb = Rgb(0x5a, 0xa0, 0xff);
const CYAN: Rgb = Rgb(0x74, 0xff, 0xd7);
const MAGENTA: Rgb = Rgb(0xff, 0x77, 0xe1);
const AMBER: Rgb = Rgb(0xff, 0xc4, 0x6b);
const VIOLET: Rgb = Rgb(0xa3, 0x8b, 0xff);
const ORANGE: Rgb = Rgb(0xff, 0x8a, 0x5a);

/// Palette and speed for the route animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub line: Rgb,
    pub glow: Rgb,
    pub dot: Rgb,
    pub line_alpha: f64,
    pub glow_alpha: f64,
    /// Curve parameter advanced per millisecond before the per-route multiplier.
    pub speed: f64,
}

impl Theme {
    pub fn for_trip(style: Style, budget: Budget, pace: Pace) -> Self {
        let (line, glow, dot) = match style {
            Style::Adventure => (ORANGE, CYAN, Rgb(0xff, 0xf0, 0xe6)),
            Style::Luxury => (GOLD, VIOLET, Rgb(0xff, 0xf7, 0xe6)),
            Style::Family => (MAGENTA, BLUE, Rgb(0xff, 0xe6, 0xf7)),
            Style::Budget => (CYAN, BLUE, Rgb(0xe6, 0xff, 0xfb)),
            Style::Cultural => (VIOLET, AMBER, Rgb(0xf2, 0xe6, 0xff)),
            Style::Balanced => (BLUE, CYAN, Rgb(0xea, 0xf7, 0xff)),
        };
        // richer when the budget is high, subtler when low
        let (line_alpha, glow_alpha) = match budget {
            Budget::High => (0.9, 0.85),
            Budget::Low => (0.55, 0.55),
            Budget::Medium => (0.7, 0.7),
        };
        let speed = match pace {
            Pace::Packed => 0.00085,
            Pace::Relaxed => 0.00038,
            Pace::Moderate => 0.00055,
        };

        Self {
            line,
            glow,
            dot,
            line_alpha,
            glow_alpha,
            speed,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::for_trip(Style::default(), Budget::default(), Pace::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_hex() {
        assert_eq!(BLUE.to_css(), "#5aa0ff");
        assert_eq!(Rgb(0, 1, 255).to_string(), "#0001ff");
    }

    #[test]
    fn test_default_is_balanced_medium_moderate() {
        let theme = Theme::default();
        assert_eq!(theme.line, BLUE);
        assert_eq!(theme.glow, CYAN);
        assert_eq!(theme.line_alpha, 0.7);
        assert_eq!(theme.speed, 0.00055);
    }

    #[test]
    fn test_pace_drives_speed() {
        let relaxed = Theme::for_trip(Style::Balanced, Budget::Medium, Pace::Relaxed);
        let packed = Theme::for_trip(Style::Balanced, Budget::Medium, Pace::Packed);
        assert!(relaxed.speed < packed.speed);
    }

    #[test]
    fn test_budget_drives_alpha() {
        let low = Theme::for_trip(Style::Luxury, Budget::Low, Pace::Moderate);
        let high = Theme::for_trip(Style::Luxury, Budget::High, Pace::Moderate);
        assert_eq!(low.line, GOLD);
        assert!(low.line_alpha < high.line_alpha);
        assert!(low.glow_alpha < high.glow_alpha);
    }

    #[test]
    fn test_theme_is_a_pure_function() {
        for style in Style::ALL {
            assert_eq!(
                Theme::for_trip(style, Budget::High, Pace::Packed),
                Theme::for_trip(style, Budget::High, Pace::Packed)
            );
        }
    }
}
