use dash_core::{event::Message, state::AppState};
use dash_theme::{style, Theme};
use iced::{
    widget::{container, text},
    Element, Length,
};

/// The shared error banner (`error`).
///
/// Returns `None` while hidden — callers should skip rendering.
#[derive(Debug, Default)]
pub struct BannerWidget;

impl BannerWidget {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(
        &'a self,
        state: &'a AppState,
        theme: &'a Theme,
    ) -> Option<Element<'a, Message>> {
        let message = state.banner.message()?;

        Some(
            container(text(message).size(theme.font_size))
                .padding([6, 12])
                .width(Length::Fill)
                .style(style::banner(theme))
                .into(),
        )
    }
}
