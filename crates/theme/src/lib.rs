pub mod colors;
pub mod style;

pub use colors::Color;

use dash_config::{DisplayConfig, ThemeConfig};
use dash_core::{Thresholds, UsageLevel};

/// Compiled theme derived from [`ThemeConfig`] and the display thresholds.
///
/// All colors are pre-parsed from hex strings into normalised `[0, 1]` RGBA.
/// Building a [`Theme`] is infallible — invalid color strings fall back to
/// safe defaults.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub accent:     Color,
    pub normal:     Color,
    pub warning:    Color,
    pub critical:   Color,
    pub font_size:  f32,
    pub padding:    u16,
    pub gap:        u16,
    /// `strftime` format string for the clock time display.
    pub clock_format: String,
    /// `strftime` format string for the clock date display.
    pub date_format: String,
    /// `strftime` format string for history timestamps.
    pub timestamp_format: String,
    pub thresholds: Thresholds,
}

impl Theme {
    /// Build a [`Theme`] from the `[theme]` and `[display]` sections.
    pub fn from_config(cfg: &ThemeConfig, display: &DisplayConfig) -> Self {
        Self {
            background: Color::from_hex(&cfg.background).unwrap_or(Color::DARK),
            foreground: Color::from_hex(&cfg.foreground).unwrap_or(Color::WHITE),
            accent:     Color::from_hex(&cfg.accent).unwrap_or(Color::PURPLE),
            normal:     Color::from_hex(&cfg.normal).unwrap_or(Color::GREEN),
            warning:    Color::from_hex(&cfg.warning).unwrap_or(Color::AMBER),
            critical:   Color::from_hex(&cfg.critical).unwrap_or(Color::RED),
            font_size:  cfg.font_size,
            padding:    cfg.padding,
            gap:        cfg.gap,
            clock_format:     cfg.clock_format.clone(),
            date_format:      cfg.date_format.clone(),
            timestamp_format: cfg.timestamp_format.clone(),
            thresholds:       display.thresholds(),
        }
    }

    /// Text color for a usage percentage.
    pub fn usage_color(&self, percent: f64) -> Color {
        self.level_color(self.thresholds.classify(percent))
    }

    pub fn level_color(&self, level: UsageLevel) -> Color {
        match level {
            UsageLevel::Normal   => self.normal,
            UsageLevel::Warning  => self.warning,
            UsageLevel::Critical => self.critical,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default(), &DisplayConfig::default())
    }
}
