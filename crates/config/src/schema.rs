use serde::{Deserialize, Serialize};

/// Root configuration structure parsed from `sysdash.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashConfig {
    /// Where the monitoring backend lives and how to talk to it.
    pub backend: BackendConfig,
    /// Poll and refresh intervals.
    pub polling: PollingConfig,
    /// What the dashboard shows and for how long.
    pub display: DisplayConfig,
    /// Theme / visual settings.
    pub theme: ThemeConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL the endpoint paths are appended to.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// HTTP Basic auth user; no auth header is sent when unset.
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url:   "http://127.0.0.1:8000".to_string(),
            timeout_ms: 4_000,
            username:   None,
            password:   None,
        }
    }
}

/// Intervals in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    pub clock_ms:   u64,
    pub status_ms:  u64,
    pub uptime_ms:  u64,
    pub diskio_ms:  u64,
    pub history_ms: u64,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            clock_ms:   1_000,
            status_ms:  5_000,
            uptime_ms:  1_000,
            diskio_ms:  5_000,
            history_ms: 5_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows shown in the unfiltered history table.
    pub history_rows: usize,
    /// How long the error banner stays up (milliseconds).
    pub banner_ms: u64,
    /// Lower bound (inclusive) of the amber tier.
    pub warning_percent: f64,
    /// Lower bound (inclusive) of the red tier.
    pub critical_percent: f64,
    /// Show the running disk I/O average next to the live value.
    pub show_disk_io_average: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            history_rows:         10,
            banner_ms:            5_000,
            warning_percent:      60.0,
            critical_percent:     80.0,
            show_disk_io_average: true,
        }
    }
}

/// Theme / styling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Window background color (hex, e.g. `"#1e1e2e"`).
    pub background: String,
    /// Primary text/foreground color.
    pub foreground: String,
    /// Accent / highlight color (headings, buttons).
    pub accent: String,
    /// Usage below the warning threshold.
    pub normal: String,
    /// Usage in the warning tier.
    pub warning: String,
    /// Usage at or above the critical threshold; also the error banner.
    pub critical: String,
    /// Font size in points.
    pub font_size: f32,
    /// Inner padding for each panel (pixels).
    pub padding: u16,
    /// Gap between panels (pixels).
    pub gap: u16,
    /// `strftime` format for the clock time.
    pub clock_format: String,
    /// `strftime` format for the clock date.
    pub date_format: String,
    /// `strftime` format for history timestamps.
    pub timestamp_format: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background:       "#1e1e2e".to_string(),
            foreground:       "#cdd6f4".to_string(),
            accent:           "#cba6f7".to_string(),
            normal:           "#28a745".to_string(),
            warning:          "#ffc107".to_string(),
            critical:         "#dc3545".to_string(),
            font_size:        14.0,
            padding:          12,
            gap:              8,
            clock_format:     "%H:%M:%S".to_string(),
            date_format:      "%-d-%B %Y".to_string(),
            timestamp_format: "%-m/%-d/%Y, %-I:%M:%S %p".to_string(),
        }
    }
}
