use thiserror::Error;

/// Top-level error type used across the entire application.
///
/// Variants carry rendered strings rather than source errors so the type stays
/// `Clone` and can travel inside UI messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DashError {
    #[error("config error: {0}")]
    Config(String),

    /// Transport-level failure: connect, timeout, TLS, body read.
    #[error("request to {endpoint} failed: {reason}")]
    Http { endpoint: String, reason: String },

    /// The backend answered with a non-2xx status.
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },

    /// The body was not the JSON shape we expected.
    #[error("cannot decode {endpoint} response: {reason}")]
    Decode { endpoint: String, reason: String },

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
}

pub type Result<T, E = DashError> = std::result::Result<T, E>;

/// Why a single history row could not be rendered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    #[error("missing timestamp")]
    MissingTimestamp,

    #[error("unparseable timestamp '{0}'")]
    BadTimestamp(String),

    #[error("field `{0}` is not numeric")]
    NotNumeric(&'static str),
}
