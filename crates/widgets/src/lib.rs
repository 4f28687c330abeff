pub mod banner;
pub mod clock;
pub mod diskio;
pub mod filter;
pub mod history;
pub mod resources;
pub mod uptime;

pub use banner::BannerWidget;
pub use clock::ClockWidget;
pub use diskio::DiskIoWidget;
pub use filter::FilterWidget;
pub use history::{render_table, HistoryWidget, RenderedRow, TableMode, TableView};
pub use resources::ResourcesWidget;
pub use uptime::UptimeWidget;

use dash_core::event::Message;
use dash_theme::{style, Theme};
use iced::{
    widget::{column, container, text},
    Element, Length,
};

/// Shown in a slot that has not received data yet.
pub const PLACEHOLDER: &str = "--";

/// `value` to one decimal place, with exact ties rounded away from zero.
///
/// `{:.1}` breaks exact binary ties to even (`0.25` → `0.2`); readings here
/// round half up (`0.25` → `0.3`).  Values that only look like ties in
/// decimal (`0.15` is stored just below) keep their nearest rounding.
pub fn fixed1(value: f64) -> String {
    let scaled = value * 20.0;
    let exact_tie = scaled.is_finite()
        && scaled.fract() == 0.0
        && scaled % 2.0 != 0.0
        // Residual of the multiplication: zero only if `scaled` is exact.
        && value.mul_add(20.0, -scaled) == 0.0;

    if !exact_tie {
        return format!("{value:.1}");
    }

    let tenths = ((scaled.abs() + 1.0) / 2.0) as u64;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{}", tenths / 10, tenths % 10)
}

/// Labelled card wrapping one display slot.
pub(crate) fn card<'a>(
    label: &'a str,
    body: impl Into<Element<'a, Message>>,
    theme: &Theme,
) -> Element<'a, Message> {
    let heading = text(label)
        .size(theme.font_size - 2.0)
        .color(theme.accent.to_iced());

    container(column![heading, body.into()].spacing(4))
        .padding(theme.padding)
        .width(Length::Fill)
        .style(style::panel(theme))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_ties_round_up() {
        assert_eq!(fixed1(0.25), "0.3");
        assert_eq!(fixed1(62.25), "62.3");
        assert_eq!(fixed1(2.25), "2.3");
        assert_eq!(fixed1(0.75), "0.8");
        assert_eq!(fixed1(-0.25), "-0.3");
    }

    #[test]
    fn non_ties_use_nearest() {
        assert_eq!(fixed1(0.15), "0.1");
        assert_eq!(fixed1(0.05), "0.1");
        assert_eq!(fixed1(12.345), "12.3");
        assert_eq!(fixed1(80.0), "80.0");
        assert_eq!(fixed1(0.0), "0.0");
    }
}
