use crate::{
    banner::ErrorBanner,
    diskio::DiskIoAverage,
    error::Result,
    history::{DateRange, HistoryCache, HistoryRow},
    sequence::ResponseGate,
};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// `/status` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusSample {
    pub cpu_percent:    f64,
    pub memory_percent: f64,
    pub disk_percent:   f64,
    /// Pre-formatted by the backend, e.g. `"03:12:45"`.
    #[serde(default)]
    pub uptime:         Option<String>,
}

/// `/diskio` response.  Speeds are MB/s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiskIoSample {
    pub total_speed: f64,
    #[serde(default)]
    pub read_speed:  Option<f64>,
    #[serde(default)]
    pub write_speed: Option<f64>,
}

/// One [`ResponseGate`] per poller.
#[derive(Debug, Clone, Copy, Default)]
pub struct PollerGates {
    pub status:  ResponseGate,
    pub uptime:  ResponseGate,
    pub disk_io: ResponseGate,
    pub history: ResponseGate,
}

/// Central application state — every display slot reads from here.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current local time (updated every clock tick).
    pub time: DateTime<Local>,
    /// Last successful `/status` sample; kept as-is when a poll fails.
    pub status: Option<StatusSample>,
    /// Last non-empty uptime string.
    pub uptime: Option<String>,
    /// Last successful `/diskio` sample.
    pub disk_io: Option<DiskIoSample>,
    pub disk_io_avg: DiskIoAverage,
    pub history: HistoryCache,
    /// Active date filter; `None` shows the capped recent view.
    pub filter: Option<DateRange>,
    /// Raw text of the `from-date` input.
    pub from_input: String,
    /// Raw text of the `to-date` input.
    pub to_input: String,
    pub banner: ErrorBanner,
    pub gates: PollerGates,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            time:        Local::now(),
            status:      None,
            uptime:      None,
            disk_io:     None,
            disk_io_avg: DiskIoAverage::new(),
            history:     HistoryCache::new(),
            filter:      None,
            from_input:  String::new(),
            to_input:    String::new(),
            banner:      ErrorBanner::new(),
            gates:       PollerGates::default(),
        }
    }
}

impl AppState {
    pub fn apply_status(&mut self, sample: StatusSample) {
        self.status = Some(sample);
    }

    /// Only a non-empty uptime replaces the displayed one.
    pub fn apply_uptime(&mut self, sample: &StatusSample) {
        if let Some(uptime) = sample.uptime.as_ref().filter(|u| !u.is_empty()) {
            self.uptime = Some(uptime.clone());
        }
    }

    /// Store the sample and fold it into the running mean.
    pub fn apply_disk_io(&mut self, sample: DiskIoSample) {
        self.disk_io_avg.record(sample.total_speed);
        self.disk_io = Some(sample);
    }

    /// Replace the cache with a fresh response.  A fetch always lands in the
    /// recent view: any active filter is dropped, the typed inputs are kept.
    pub fn apply_history(&mut self, rows: Vec<HistoryRow>) {
        self.history.replace(rows);
        self.filter = None;
    }

    /// Parse the two date inputs and make them the active filter.
    /// On error the previous view is left untouched.
    pub fn apply_filter(&mut self) -> Result<()> {
        let range = DateRange::parse(&self.from_input, &self.to_input)?;
        self.filter = Some(range);
        Ok(())
    }

    /// Clear both inputs and return to the capped recent view.
    pub fn reset_filter(&mut self) {
        self.from_input.clear();
        self.to_input.clear();
        self.filter = None;
    }

    /// Rows the history table should show, plus whether they are a filtered
    /// view.  Recent views are returned uncapped; the renderer applies the cap.
    pub fn history_view(&self) -> (Vec<&HistoryRow>, bool) {
        match &self.filter {
            Some(range) => (self.history.filter(range), true),
            None        => (self.history.rows().iter().collect(), false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DashError;
    use serde_json::json;

    fn status(uptime: Option<&str>) -> StatusSample {
        StatusSample {
            cpu_percent:    10.0,
            memory_percent: 20.0,
            disk_percent:   30.0,
            uptime:         uptime.map(str::to_string),
        }
    }

    #[test]
    fn status_decodes_without_uptime() {
        let s: StatusSample = serde_json::from_value(json!({
            "cpu_percent": 1.0, "memory_percent": 2.0, "disk_percent": 3.0
        }))
        .unwrap();
        assert_eq!(s.uptime, None);
    }

    #[test]
    fn status_missing_percentage_is_an_error() {
        let r: std::result::Result<StatusSample, _> =
            serde_json::from_value(json!({"cpu_percent": 1.0, "memory_percent": 2.0}));
        assert!(r.is_err());
    }

    #[test]
    fn empty_uptime_keeps_previous_value() {
        let mut state = AppState::default();
        state.apply_uptime(&status(Some("01:00:00")));
        state.apply_uptime(&status(Some("")));
        state.apply_uptime(&status(None));
        assert_eq!(state.uptime.as_deref(), Some("01:00:00"));
    }

    #[test]
    fn disk_io_updates_sample_and_average() {
        let mut state = AppState::default();
        for total in [2.0, 4.0] {
            state.apply_disk_io(DiskIoSample { total_speed: total, read_speed: None, write_speed: None });
        }
        assert_eq!(state.disk_io.as_ref().map(|d| d.total_speed), Some(4.0));
        assert_eq!(state.disk_io_avg.mean(), 3.0);
        assert_eq!(state.disk_io_avg.count(), 2);
    }

    #[test]
    fn filter_round_trip() {
        let mut state = AppState::default();
        state.apply_history(
            serde_json::from_value(json!([
                {"timestamp": "2024-01-10T10:00:00", "cpu_percent": 1, "memory_percent": 1, "disk_percent": 1},
                {"timestamp": "2024-02-10T10:00:00", "cpu_percent": 1, "memory_percent": 1, "disk_percent": 1},
            ]))
            .unwrap(),
        );

        state.from_input = "2024-01-01".into();
        state.to_input = "2024-01-31".into();
        state.apply_filter().unwrap();
        let (rows, filtered) = state.history_view();
        assert!(filtered);
        assert_eq!(rows.len(), 1);

        state.reset_filter();
        let (rows, filtered) = state.history_view();
        assert!(!filtered);
        assert_eq!(rows.len(), 2);
        assert!(state.from_input.is_empty() && state.to_input.is_empty());
    }

    #[test]
    fn history_refresh_returns_to_recent_view() {
        let rows = |n: u32| -> Vec<HistoryRow> {
            (1..=n)
                .map(|d| {
                    serde_json::from_value(json!({
                        "timestamp": format!("2024-01-{d:02}T10:00:00"),
                        "cpu_percent": 1, "memory_percent": 1, "disk_percent": 1,
                    }))
                    .unwrap()
                })
                .collect()
        };

        let mut state = AppState::default();
        state.apply_history(rows(15));
        state.from_input = "2024-01-01".into();
        state.to_input = "2024-01-03".into();
        state.apply_filter().unwrap();
        assert_eq!(state.history_view().0.len(), 3);

        state.apply_history(rows(15));
        let (view, filtered) = state.history_view();
        assert!(!filtered);
        assert_eq!(view.len(), 15);
        assert!(state.filter.is_none());
        assert_eq!(state.from_input, "2024-01-01");
        assert_eq!(state.to_input, "2024-01-03");
    }

    #[test]
    fn invalid_filter_input_keeps_current_view() {
        let mut state = AppState::default();
        state.from_input = "not a date".into();
        assert_eq!(state.apply_filter(), Err(DashError::InvalidDate("not a date".into())));
        assert!(state.filter.is_none());
    }
}
