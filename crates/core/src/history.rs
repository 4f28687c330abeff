use crate::error::{DashError, RowError};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use serde::Deserialize;
use serde_json::Value;

/// A numeric field as the backend actually sends it.
///
/// Numbers arrive as JSON numbers most of the time, but rows written by older
/// backends carry them as strings.  Anything else is kept so it can be
/// reported when the row is rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum NumberLike {
    Number(f64),
    Text(String),
    Other(Value),
}

impl Default for NumberLike {
    fn default() -> Self {
        Self::Other(Value::Null)
    }
}

impl From<Value> for NumberLike {
    fn from(value: Value) -> Self {
        match value {
            Value::Number(n) => n.as_f64().map_or(Self::Other(Value::Number(n)), Self::Number),
            Value::String(s) => Self::Text(s),
            other            => Self::Other(other),
        }
    }
}

impl NumberLike {
    /// Numeric value, reading text with leading-prefix semantics
    /// (`"12.5 MB"` → `12.5`).  `None` when nothing numeric is found.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n).filter(|n| !n.is_nan()),
            Self::Text(s)   => parse_float_prefix(s),
            Self::Other(_)  => None,
        }
    }
}

/// Parse the longest numeric prefix of `s`, after leading whitespace.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }
    let rest = &s[end..];
    if rest.starts_with("Infinity") {
        return s[..end + "Infinity".len()].parse().ok();
    }

    let int_start = end;
    while bytes.get(end).is_some_and(u8::is_ascii_digit) {
        end += 1;
    }
    let mut digits = end - int_start;
    if bytes.get(end) == Some(&b'.') {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it.
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// One historical sample from `/history`.
///
/// Deserialisation never fails for an individual element: a non-object
/// element or a missing field yields a row that fails later, at render time,
/// so one bad row cannot sink the whole response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub struct HistoryRow {
    pub timestamp:      Option<String>,
    pub cpu_percent:    NumberLike,
    pub memory_percent: NumberLike,
    pub disk_percent:   NumberLike,
    pub disk_io_mb_sec: NumberLike,
}

impl From<Value> for HistoryRow {
    fn from(value: Value) -> Self {
        let Value::Object(mut map) = value else {
            return Self::default();
        };
        let mut take = |key: &str| map.remove(key).map(NumberLike::from).unwrap_or_default();

        let cpu_percent    = take("cpu_percent");
        let memory_percent = take("memory_percent");
        let disk_percent   = take("disk_percent");
        let disk_io_mb_sec = take("disk_io_mb_sec");
        let timestamp = match map.remove("timestamp") {
            Some(Value::String(s)) => Some(s),
            Some(Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };

        Self { timestamp, cpu_percent, memory_percent, disk_percent, disk_io_mb_sec }
    }
}

/// The parsed, render-ready values of a [`HistoryRow`].
#[derive(Debug, Clone, PartialEq)]
pub struct RowValues {
    pub timestamp: DateTime<Local>,
    pub cpu:       f64,
    pub memory:    f64,
    pub disk:      f64,
    /// Missing or non-numeric I/O speed reads as `0.0`.
    pub io:        f64,
}

impl HistoryRow {
    /// Parsed timestamp, `None` when missing or unparseable.
    pub fn time(&self) -> Option<DateTime<Local>> {
        self.timestamp.as_deref().and_then(parse_timestamp)
    }

    pub fn values(&self) -> Result<RowValues, RowError> {
        let raw = self.timestamp.as_deref().ok_or(RowError::MissingTimestamp)?;
        let timestamp = parse_timestamp(raw).ok_or_else(|| RowError::BadTimestamp(raw.to_string()))?;

        let number = |field: &NumberLike, name: &'static str| {
            field.as_f64().ok_or(RowError::NotNumeric(name))
        };

        Ok(RowValues {
            timestamp,
            cpu:    number(&self.cpu_percent, "cpu_percent")?,
            memory: number(&self.memory_percent, "memory_percent")?,
            disk:   number(&self.disk_percent, "disk_percent")?,
            io:     self.disk_io_mb_sec.as_f64().unwrap_or(0.0),
        })
    }
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339, naive `YYYY-MM-DD[T ]HH:MM:SS[.f]` (local time) and a
/// bare `YYYY-MM-DD` (local midnight).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Local));
    }

    let naive = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })?;

    resolve_local(&Local, &naive)
}

/// Pin a wall-clock time to `tz`.  A time skipped by a forward clock change
/// is moved one hour ahead, onto the far side of the gap.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: &NaiveDateTime) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(naive).earliest().or_else(|| {
        let shifted = naive.checked_add_signed(Duration::hours(1))?;
        tz.from_local_datetime(&shifted).earliest()
    })
}

/// Inclusive whole-day date range.  An unset side is open.
///
/// Both bounds are local calendar days: `to` covers its whole day rather
/// than stopping at midnight, and a blank input widens the range instead of
/// matching nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to:   Option<NaiveDate>,
}

impl DateRange {
    /// Build a range from the two filter inputs.  Blank input leaves that
    /// side open; anything else must be `YYYY-MM-DD`.
    pub fn parse(from: &str, to: &str) -> Result<Self, DashError> {
        Ok(Self {
            from: parse_bound(from)?,
            to:   parse_bound(to)?,
        })
    }

    /// `true` when `at`'s local calendar day lies within the range.
    pub fn contains(&self, at: DateTime<Local>) -> bool {
        let day = at.date_naive();
        self.from.map_or(true, |from| day >= from) && self.to.map_or(true, |to| day <= to)
    }
}

fn parse_bound(input: &str) -> Result<Option<NaiveDate>, DashError> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DashError::InvalidDate(input.to_string()))
}

/// The most recently fetched `/history` response, in server order.
#[derive(Debug, Clone, Default)]
pub struct HistoryCache {
    rows: Vec<HistoryRow>,
}

impl HistoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache wholesale with a fresh response.
    pub fn replace(&mut self, rows: Vec<HistoryRow>) {
        self.rows = rows;
    }

    pub fn rows(&self) -> &[HistoryRow] {
        &self.rows
    }

    /// Rows whose timestamp falls inside `range`, in cache order.
    /// Rows with no usable timestamp never match.
    pub fn filter(&self, range: &DateRange) -> Vec<&HistoryRow> {
        self.rows
            .iter()
            .filter(|row| row.time().is_some_and(|t| range.contains(t)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult};
    use serde_json::json;

    fn row(ts: &str) -> HistoryRow {
        serde_json::from_value(json!({
            "timestamp": ts,
            "cpu_percent": 10.0,
            "memory_percent": 20.0,
            "disk_percent": 30.0,
            "disk_io_mb_sec": 1.5,
        }))
        .unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn number_like_reads_numeric_prefix() {
        assert_eq!(NumberLike::Text("12.5".into()).as_f64(), Some(12.5));
        assert_eq!(NumberLike::Text("  7 MB/s".into()).as_f64(), Some(7.0));
        assert_eq!(NumberLike::Text("-.5e2x".into()).as_f64(), Some(-50.0));
        assert_eq!(NumberLike::Text("3e".into()).as_f64(), Some(3.0));
        assert_eq!(NumberLike::Text("abc".into()).as_f64(), None);
        assert_eq!(NumberLike::Text(".".into()).as_f64(), None);
        assert_eq!(NumberLike::Other(Value::Null).as_f64(), None);
    }

    #[test]
    fn history_response_with_odd_elements_still_decodes() {
        let rows: Vec<HistoryRow> = serde_json::from_value(json!([
            {"timestamp": "2024-01-05T10:00:00", "cpu_percent": "12.5",
             "memory_percent": 40, "disk_percent": 50.0, "disk_io_mb_sec": null},
            42,
            {"cpu_percent": {"nested": true}},
        ]))
        .unwrap();

        assert_eq!(rows.len(), 3);
        let values = rows[0].values().unwrap();
        assert_eq!(values.cpu, 12.5);
        assert_eq!(values.memory, 40.0);
        assert_eq!(values.io, 0.0);
        assert_eq!(rows[1].values(), Err(RowError::MissingTimestamp));
        assert_eq!(rows[2].values(), Err(RowError::MissingTimestamp));
    }

    #[test]
    fn non_numeric_percentage_fails_the_row() {
        let mut bad = row("2024-01-05T10:00:00");
        bad.disk_percent = NumberLike::Text("n/a".into());
        assert_eq!(bad.values(), Err(RowError::NotNumeric("disk_percent")));
    }

    #[test]
    fn bad_timestamp_fails_the_row() {
        let bad = row("yesterday");
        assert_eq!(bad.values(), Err(RowError::BadTimestamp("yesterday".into())));
    }

    #[test]
    fn parses_backend_timestamp_shapes() {
        assert!(parse_timestamp("2024-01-05T10:00:00.123456").is_some());
        assert!(parse_timestamp("2024-01-05 10:00:00").is_some());
        assert!(parse_timestamp("2024-01-05T10:00:00Z").is_some());
        assert!(parse_timestamp("2024-01-05T10:00:00+02:00").is_some());
        assert!(parse_timestamp("2024-01-05").is_some());
        assert!(parse_timestamp("05/01/2024").is_none());
    }

    #[test]
    fn date_range_parse_blank_is_open() {
        let range = DateRange::parse("", "2024-01-31").unwrap();
        assert_eq!(range.from, None);
        assert_eq!(range.to, Some(date("2024-01-31")));
        assert_eq!(
            DateRange::parse("2024-13-01", ""),
            Err(DashError::InvalidDate("2024-13-01".into()))
        );
    }

    #[test]
    fn filter_keeps_inclusive_january_range() {
        let mut cache = HistoryCache::new();
        let mut rows = vec![
            row("2024-02-01T00:00:00"),
            row("2024-01-31T23:59:59"),
            row("2024-01-15T12:00:00"),
            row("2024-01-01T00:00:00"),
            row("2023-12-31T23:59:59"),
            row("garbage"),
        ];
        // A big cache must not change the outcome.
        for day in 1..=28 {
            rows.push(row(&format!("2023-11-{day:02}T08:00:00")));
        }
        cache.replace(rows);

        let range = DateRange::parse("2024-01-01", "2024-01-31").unwrap();
        let kept: Vec<_> = cache
            .filter(&range)
            .into_iter()
            .map(|r| r.timestamp.clone().unwrap())
            .collect();

        assert_eq!(
            kept,
            ["2024-01-31T23:59:59", "2024-01-15T12:00:00", "2024-01-01T00:00:00"]
        );
    }

    #[test]
    fn open_range_matches_every_dated_row() {
        let mut cache = HistoryCache::new();
        cache.replace(vec![row("2024-01-01T10:00:00"), row("bogus"), row("2030-06-01T10:00:00")]);
        assert_eq!(cache.filter(&DateRange::default()).len(), 2);
    }

    #[test]
    fn replace_is_wholesale() {
        let mut cache = HistoryCache::new();
        cache.replace(vec![row("2024-01-01T10:00:00"), row("2024-01-02T10:00:00")]);
        cache.replace(vec![row("2024-03-01T10:00:00")]);
        assert_eq!(cache.rows().len(), 1);
        assert_eq!(cache.rows()[0].timestamp.as_deref(), Some("2024-03-01T10:00:00"));
    }

    /// UTC until 2024-03-10 02:00 local, UTC+1 from then on: 02:00..03:00
    /// that day never happens on the wall clock.
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    impl SpringForward {
        fn offset_at_utc(utc: &NaiveDateTime) -> FixedOffset {
            let switch = date("2024-03-10").and_hms_opt(2, 0, 0).unwrap();
            let secs = if *utc < switch { 0 } else { 3600 };
            FixedOffset::east_opt(secs).unwrap()
        }
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let gap_start = date("2024-03-10").and_hms_opt(2, 0, 0).unwrap();
            let gap_end = date("2024-03-10").and_hms_opt(3, 0, 0).unwrap();
            if *local < gap_start {
                LocalResult::Single(FixedOffset::east_opt(0).unwrap())
            } else if *local < gap_end {
                LocalResult::None
            } else {
                LocalResult::Single(FixedOffset::east_opt(3600).unwrap())
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            Self::offset_at_utc(&utc.and_time(NaiveTime::MIN))
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            Self::offset_at_utc(utc)
        }
    }

    #[test]
    fn time_inside_spring_forward_gap_moves_past_it() {
        let in_gap = date("2024-03-10").and_hms_opt(2, 30, 0).unwrap();
        let resolved = resolve_local(&SpringForward, &in_gap).unwrap();
        assert_eq!(
            resolved.naive_local(),
            date("2024-03-10").and_hms_opt(3, 30, 0).unwrap()
        );

        let before = date("2024-03-10").and_hms_opt(1, 30, 0).unwrap();
        assert_eq!(resolve_local(&SpringForward, &before).unwrap().naive_local(), before);
    }
}
