use crate::{card, PLACEHOLDER};
use dash_core::{event::Message, state::AppState};
use dash_theme::Theme;
use iced::{widget::text, Element};

/// Displays the backend's uptime string verbatim (`uptime`).
#[derive(Debug, Default)]
pub struct UptimeWidget;

impl UptimeWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, state: &'a AppState, theme: &'a Theme) -> Element<'a, Message> {
        let label = state.uptime.as_deref().unwrap_or(PLACEHOLDER);
        card("Uptime", text(label).size(theme.font_size * 1.6), theme)
    }
}
