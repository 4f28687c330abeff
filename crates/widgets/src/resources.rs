use crate::{card, fixed1, PLACEHOLDER};
use dash_core::{event::Message, state::AppState};
use dash_theme::Theme;
use iced::{
    widget::{text, Row},
    Element,
};

/// CPU, memory and disk usage cards (`cpu`, `mem`, `disk`), each colored by
/// its usage tier.
///
/// Reads the last successful `/status` sample; a failed poll leaves the
/// previous values on screen.
#[derive(Debug, Default)]
pub struct ResourcesWidget;

impl ResourcesWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, state: &'a AppState, theme: &'a Theme) -> Element<'a, Message> {
        let values = state
            .status
            .as_ref()
            .map(|s| [s.cpu_percent, s.memory_percent, s.disk_percent]);

        let cards = ["CPU", "Memory", "Disk"].into_iter().enumerate().map(|(i, label)| {
            let value = values.map(|v| v[i]);
            card(label, usage_text(value, theme), theme)
        });

        Row::with_children(cards).spacing(theme.gap as f32).into()
    }
}

fn usage_text<'a>(value: Option<f64>, theme: &Theme) -> Element<'a, Message> {
    let size = theme.font_size * 1.6;
    match value {
        Some(v) => text(format_percent(v))
            .size(size)
            .color(theme.usage_color(v).to_iced())
            .into(),
        None => text(PLACEHOLDER).size(size).into(),
    }
}

/// One decimal place with a `%` suffix.
pub fn format_percent(value: f64) -> String {
    format!("{}%", fixed1(value))
}
