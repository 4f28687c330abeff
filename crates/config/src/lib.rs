pub mod schema;
pub mod watcher;

pub use schema::{BackendConfig, DashConfig, DisplayConfig, PollingConfig, ThemeConfig};
pub use watcher::ConfigWatcher;

use dash_core::{DashError, Result, Thresholds};
use std::path::{Path, PathBuf};

/// Load configuration from a TOML file.  Returns `DashConfig::default()` if
/// the file doesn't exist so the dashboard always has sensible defaults.
pub fn load(path: impl AsRef<Path>) -> Result<DashConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Config file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(DashConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| DashError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse configuration from TOML text.
pub fn parse(raw: &str) -> Result<DashConfig> {
    toml::from_str(raw).map_err(|e| DashError::Config(format!("TOML parse error: {e}")))
}

/// Return the default config path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("sysdash").join("sysdash.toml")
}

impl DisplayConfig {
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            warning:  self.warning_percent,
            critical: self.critical_percent,
        }
    }
}
