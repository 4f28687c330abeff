use chrono::{DateTime, TimeZone};
use dash_core::{event::Message, state::AppState};
use dash_theme::Theme;
use iced::{
    widget::{column, text},
    Alignment, Element,
};
use std::fmt::{Display, Write};

/// Fallback when a configured format string is not valid `strftime`.
const FALLBACK_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Displays the current date (`current-date`) and time (`current-time`).
///
/// Reads `state.time` which is updated on every `Message::Tick`.
/// Format strings come from `theme.date_format` and `theme.clock_format`.
#[derive(Debug, Default)]
pub struct ClockWidget;

impl ClockWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, state: &'a AppState, theme: &'a Theme) -> Element<'a, Message> {
        let date_str = strftime(&state.time, &theme.date_format);
        let time_str = strftime(&state.time, &theme.clock_format);

        column![
            text(date_str).size(theme.font_size),
            text(time_str).size(theme.font_size * 1.8),
        ]
        .align_x(Alignment::End)
        .into()
    }
}

/// Format `dt` with a user-supplied `strftime` string.
///
/// chrono reports a bad format string only while writing; a plain
/// `to_string()` would panic, so write into a buffer and fall back instead.
pub fn strftime<Tz>(dt: &DateTime<Tz>, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    if write!(out, "{}", dt.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", dt.format(FALLBACK_FORMAT));
    }
    out
}
