use crate::{Color, Theme};
use iced::{widget::container, Background, Border};

/// Card background behind each panel.
pub fn panel(theme: &Theme) -> impl Fn(&iced::Theme) -> container::Style {
    let bg = theme.foreground.with_alpha(0.06).to_iced();
    let fg = theme.foreground.to_iced();
    move |_| container::Style {
        background: Some(Background::Color(bg)),
        text_color: Some(fg),
        border:     Border { radius: 8.0.into(), ..Default::default() },
        ..Default::default()
    }
}

/// Error banner strip.
pub fn banner(theme: &Theme) -> impl Fn(&iced::Theme) -> container::Style {
    let bg = theme.critical.with_alpha(0.9).to_iced();
    let fg = Color::WHITE.to_iced();
    move |_| container::Style {
        background: Some(Background::Color(bg)),
        text_color: Some(fg),
        border:     Border { radius: 6.0.into(), ..Default::default() },
        ..Default::default()
    }
}
