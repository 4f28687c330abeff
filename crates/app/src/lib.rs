//! Desktop window for `sysdash`.
//!
//! Owns the Iced application loop and wires together all background tasks:
//! - `/status` pollers (resource cards, uptime)
//! - `/diskio` poller
//! - `/history` poller
//! - Config file watcher (live reload on change)
//! - Clock timer

mod streams;

use chrono::Local;
use dash_config::{default_path, load as load_config, DashConfig};
use dash_core::{Message, Polled};
use dash_theme::Theme;
use dash_widgets::{
    BannerWidget, ClockWidget, DiskIoWidget, FilterWidget, HistoryWidget, ResourcesWidget,
    UptimeWidget,
};
use iced::{
    widget::{column, container, row, text, Space},
    Alignment, Element, Length, Size, Subscription, Task,
};
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const STATUS_FAILED: &str = "Failed to update status";
pub const DISK_IO_FAILED: &str = "Failed to update disk I/O";
pub const HISTORY_FAILED: &str = "Failed to load history";
pub const INVALID_DATE: &str = "Invalid filter date";

// ── Entry point ───────────────────────────────────────────────────────────────

/// Open the dashboard window.  Returns when the window is closed.
pub fn run() -> iced::Result {
    iced::application(Dashboard::new, Dashboard::update, Dashboard::view)
        .title("System Dashboard")
        .subscription(Dashboard::subscription)
        .style(Dashboard::style)
        .window_size(Size::new(1100.0, 720.0))
        .run()
}

// ── State ─────────────────────────────────────────────────────────────────────

struct Dashboard {
    state:     dash_core::AppState,
    config:    DashConfig,
    theme:     Theme,
    // Header
    clock:     ClockWidget,
    banner:    BannerWidget,
    // Cards
    resources: ResourcesWidget,
    disk_io:   DiskIoWidget,
    uptime:    UptimeWidget,
    // History
    filter:    FilterWidget,
    history:   HistoryWidget,
}

impl Dashboard {
    fn new() -> (Self, Task<Message>) {
        let config = load_config(default_path()).unwrap_or_else(|e| {
            warn!("Config load failed, using defaults: {e}");
            DashConfig::default()
        });
        (Self::with_config(config), Task::none())
    }

    fn with_config(config: DashConfig) -> Self {
        let theme = Theme::from_config(&config.theme, &config.display);

        Self {
            state:     dash_core::AppState::default(),
            theme,
            clock:     ClockWidget::new(),
            banner:    BannerWidget::new(),
            resources: ResourcesWidget::new(),
            disk_io:   DiskIoWidget::new(config.display.show_disk_io_average),
            uptime:    UptimeWidget::new(),
            filter:    FilterWidget::new(),
            history:   HistoryWidget::new(config.display.history_rows),
            config,
        }
    }

    // ── Update ────────────────────────────────────────────────────────────────

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Tick => {
                self.state.time = Local::now();
            }
            Message::Status(polled) => {
                if let Some(result) = admit(&mut self.state.gates.status, "status", polled) {
                    match result {
                        Ok(sample) => self.state.apply_status(sample),
                        Err(e) => {
                            warn!("Status poll failed: {e}");
                            return self.show_error(STATUS_FAILED);
                        }
                    }
                }
            }
            Message::Uptime(polled) => {
                // Uptime failures are logged only; they never reach the banner.
                if let Some(result) = admit(&mut self.state.gates.uptime, "uptime", polled) {
                    match result {
                        Ok(sample) => self.state.apply_uptime(&sample),
                        Err(e) => error!("Failed to update uptime: {e}"),
                    }
                }
            }
            Message::DiskIo(polled) => {
                if let Some(result) = admit(&mut self.state.gates.disk_io, "diskio", polled) {
                    match result {
                        Ok(sample) => self.state.apply_disk_io(sample),
                        Err(e) => {
                            warn!("Disk I/O poll failed: {e}");
                            return self.show_error(DISK_IO_FAILED);
                        }
                    }
                }
            }
            Message::History(polled) => {
                if let Some(result) = admit(&mut self.state.gates.history, "history", polled) {
                    match result {
                        Ok(rows) => {
                            debug!(rows = rows.len(), "History refreshed");
                            self.state.apply_history(rows);
                        }
                        Err(e) => {
                            warn!("History poll failed: {e}");
                            return self.show_error(HISTORY_FAILED);
                        }
                    }
                }
            }
            Message::FromDateChanged(value) => {
                self.state.from_input = value;
            }
            Message::ToDateChanged(value) => {
                self.state.to_input = value;
            }
            Message::ApplyFilter => {
                if let Err(e) = self.state.apply_filter() {
                    warn!("Filter rejected: {e}");
                    return self.show_error(INVALID_DATE);
                }
            }
            Message::ResetFilter => {
                self.state.reset_filter();
            }
            Message::BannerExpired(generation) => {
                self.state.banner.expire(generation);
            }
            Message::ConfigReloaded => match load_config(default_path()) {
                Ok(cfg) => {
                    info!("Config reloaded");
                    self.apply_config(cfg);
                }
                Err(e) => warn!("Config reload failed: {e}"),
            },
        }
        Task::none()
    }

    /// Put `message` on the banner and schedule its hide.
    fn show_error(&mut self, message: &str) -> Task<Message> {
        let generation = self.state.banner.show(message);
        let after = Duration::from_millis(self.config.display.banner_ms);
        Task::perform(banner_timer(generation, after), Message::BannerExpired)
    }

    /// Live-reloadable settings: theme and display.  Backend and polling
    /// changes take effect on the next start.
    fn apply_config(&mut self, config: DashConfig) {
        self.theme   = Theme::from_config(&config.theme, &config.display);
        self.disk_io = DiskIoWidget::new(config.display.show_disk_io_average);
        self.history.set_cap(config.display.history_rows);
        self.config  = config;
    }

    // ── View ──────────────────────────────────────────────────────────────────

    fn view(&self) -> Element<'_, Message> {
        let gap = self.theme.gap as f32;

        let title = text("System Dashboard")
            .size(self.theme.font_size * 1.6)
            .color(self.theme.accent.to_iced());
        let header = row![
            title,
            Space::new().width(Length::Fill),
            self.clock.view(&self.state, &self.theme),
        ]
        .align_y(Alignment::Center);

        let cards = row![
            container(self.resources.view(&self.state, &self.theme)).width(Length::FillPortion(3)),
            container(self.disk_io.view(&self.state, &self.theme)).width(Length::FillPortion(1)),
            container(self.uptime.view(&self.state, &self.theme)).width(Length::FillPortion(1)),
        ]
        .spacing(gap);

        let mut page = column![header].spacing(gap);
        if let Some(banner) = self.banner.view(&self.state, &self.theme) {
            page = page.push(banner);
        }
        let page = page
            .push(cards)
            .push(self.filter.view(&self.state, &self.theme))
            .push(self.history.view(&self.state, &self.theme));

        container(page)
            .padding(self.theme.padding)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    // ── Subscriptions ─────────────────────────────────────────────────────────

    fn subscription(&self) -> Subscription<Message> {
        let tick = iced::time::every(streams::period(self.config.polling.clock_ms))
            .map(|_| Message::Tick);

        Subscription::batch([
            tick,
            Subscription::run(streams::status_stream),
            Subscription::run(streams::uptime_stream),
            Subscription::run(streams::disk_io_stream),
            Subscription::run(streams::history_stream),
            Subscription::run(streams::config_stream),
        ])
    }

    // ── Style ─────────────────────────────────────────────────────────────────

    fn style(&self, _theme: &iced::Theme) -> iced::theme::Style {
        iced::theme::Style {
            background_color: self.theme.background.to_iced(),
            text_color:       self.theme.foreground.to_iced(),
        }
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Pass `polled` through its poller's gate; stale outcomes are dropped.
fn admit<T>(
    gate: &mut dash_core::ResponseGate,
    poller: &str,
    polled: Polled<T>,
) -> Option<dash_core::Result<T>> {
    if gate.admit(polled.seq) {
        Some(polled.result)
    } else {
        debug!(poller, seq = polled.seq, "Dropping out-of-order response");
        None
    }
}

/// Resolves to `generation` once the banner has been up for `after`.
async fn banner_timer(generation: u64, after: Duration) -> u64 {
    tokio::time::sleep(after).await;
    generation
}
