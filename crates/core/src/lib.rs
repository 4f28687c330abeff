pub mod banner;
pub mod diskio;
pub mod error;
pub mod event;
pub mod history;
pub mod level;
pub mod sequence;
pub mod state;

pub use banner::ErrorBanner;
pub use diskio::DiskIoAverage;
pub use error::{DashError, Result, RowError};
pub use event::{Message, Polled};
pub use history::{DateRange, HistoryCache, HistoryRow, NumberLike, RowValues};
pub use level::{Thresholds, UsageLevel};
pub use sequence::ResponseGate;
pub use state::{AppState, DiskIoSample, PollerGates, StatusSample};
