use crate::{
    error::DashError,
    history::HistoryRow,
    state::{DiskIoSample, StatusSample},
};

/// Outcome of one poll, tagged with the poller's request sequence number.
#[derive(Debug, Clone)]
pub struct Polled<T> {
    pub seq:    u64,
    pub result: Result<T, DashError>,
}

impl<T> Polled<T> {
    pub fn new(seq: u64, result: Result<T, DashError>) -> Self {
        Self { seq, result }
    }
}

/// All messages (events) that can flow through the application event bus.
///
/// Sources:
/// - Poller tasks          → `Status`, `Uptime`, `DiskIo`, `History`
/// - Config watcher task   → `ConfigReloaded`
/// - Timer subscription    → `Tick`
/// - Banner countdown      → `BannerExpired`
/// - Filter controls       → `FromDateChanged`, `ToDateChanged`, `ApplyFilter`, `ResetFilter`
#[derive(Debug, Clone)]
pub enum Message {
    // ── Pollers ───────────────────────────────────────────────────────────────
    /// `/status` result for the resource cards.
    Status(Polled<StatusSample>),
    /// `/status` result for the uptime display only.
    Uptime(Polled<StatusSample>),
    /// `/diskio` result.
    DiskIo(Polled<DiskIoSample>),
    /// `/history` result.
    History(Polled<Vec<HistoryRow>>),

    // ── Filter controls ───────────────────────────────────────────────────────
    FromDateChanged(String),
    ToDateChanged(String),
    ApplyFilter,
    ResetFilter,

    // ── Config ────────────────────────────────────────────────────────────────
    /// Config file changed on disk — triggers a live reload.
    ConfigReloaded,

    // ── Internal ──────────────────────────────────────────────────────────────
    /// Clock timer tick.
    Tick,
    /// Hide countdown for the banner generation carried here ran out.
    BannerExpired(u64),
}
