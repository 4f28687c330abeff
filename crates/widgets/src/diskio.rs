use crate::{card, fixed1, PLACEHOLDER};
use dash_core::{event::Message, state::AppState};
use dash_theme::Theme;
use iced::{
    widget::{column, text},
    Element,
};

/// Live disk throughput (`disk-io`) with the running average (`disk-io-avg`).
#[derive(Debug, Default)]
pub struct DiskIoWidget {
    show_average: bool,
}

impl DiskIoWidget {
    pub fn new(show_average: bool) -> Self {
        Self { show_average }
    }

    pub fn view<'a>(&'a self, state: &'a AppState, theme: &'a Theme) -> Element<'a, Message> {
        let Some(sample) = &state.disk_io else {
            return card("Disk I/O", text(PLACEHOLDER).size(theme.font_size * 1.6), theme);
        };

        let mut body = column![text(format_speed(sample.total_speed)).size(theme.font_size * 1.6)]
            .spacing(2);

        if let (Some(read), Some(write)) = (sample.read_speed, sample.write_speed) {
            body = body.push(text(format_split(read, write)).size(theme.font_size - 2.0));
        }

        if self.show_average && state.disk_io_avg.count() > 0 {
            let avg = format!("avg {}", format_speed(state.disk_io_avg.mean()));
            body = body.push(
                text(avg)
                    .size(theme.font_size - 2.0)
                    .color(theme.foreground.with_alpha(0.7).to_iced()),
            );
        }

        card("Disk I/O", body, theme)
    }
}

/// One decimal place with the `MB/s` unit.
pub fn format_speed(mb_per_sec: f64) -> String {
    format!("{} MB/s", fixed1(mb_per_sec))
}

fn format_split(read: f64, write: f64) -> String {
    format!("R {} / W {} MB/s", fixed1(read), fixed1(write))
}
