use dash_core::{event::Message, state::AppState};
use dash_theme::Theme;
use iced::{
    widget::{button, row, text, text_input},
    Alignment, Element,
};

/// Date-range inputs (`from-date`, `to-date`) with apply and reset buttons.
#[derive(Debug, Default)]
pub struct FilterWidget;

impl FilterWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, state: &'a AppState, theme: &'a Theme) -> Element<'a, Message> {
        let from = text_input("From (YYYY-MM-DD)", &state.from_input)
            .on_input(Message::FromDateChanged)
            .on_submit(Message::ApplyFilter)
            .width(160);
        let to = text_input("To (YYYY-MM-DD)", &state.to_input)
            .on_input(Message::ToDateChanged)
            .on_submit(Message::ApplyFilter)
            .width(160);

        let status = if state.filter.is_some() { "filtered" } else { "" };

        row![
            from,
            to,
            button(text("Apply")).on_press(Message::ApplyFilter),
            button(text("Reset"))
                .on_press(Message::ResetFilter)
                .style(button::secondary),
            text(status)
                .size(theme.font_size - 2.0)
                .color(theme.accent.to_iced()),
        ]
        .spacing(theme.gap as f32)
        .align_y(Alignment::Center)
        .into()
    }
}
