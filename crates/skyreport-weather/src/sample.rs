//! Aligning hourly weather data with a requested time.
//!
//! A request for "now" gets the live reading; anything else gets the hourly
//! bucket closest to the top of the requested hour.
//!
//! The hourly scan walks forward and stops at the first parsed timestamp at
//! or after the truncated target (past index 0). For the ordered hourly
//! series Open-Meteo returns this is the true closest bucket; for unordered
//! or irregular series it can settle on a local minimum.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Timelike, Utc};

/// Requests this close to the current time use the live snapshot.
pub const LIVE_WINDOW_MINUTES: i64 = 30;

/// Formats accepted for bare (offset-less) timestamps, interpreted as UTC.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SampleError {
    #[error("No current or hourly data available")]
    NoDataAvailable,
    #[error("Hourly series is misaligned ({timestamps} timestamps, {values} values)")]
    MisalignedSeries { timestamps: usize, values: usize },
}

/// The live reading reported alongside the hourly data
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot<T> {
    pub timestamp: String,
    pub value: T,
}

/// Index-aligned timestamps and values
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries<T> {
    pub timestamps: Vec<String>,
    pub values: Vec<T>,
}

impl<T> Default for TimeSeries<T> {
    fn default() -> Self {
        Self {
            timestamps: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<T> TimeSeries<T> {
    pub fn new(timestamps: Vec<String>, values: Vec<T>) -> Self {
        Self { timestamps, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty() || self.values.is_empty()
    }

    pub fn is_aligned(&self) -> bool {
        self.timestamps.len() == self.values.len()
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DDTHH:MM[:SS]` one (as UTC).
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Hour boundaries are UTC ones, matching the `timezone=UTC` series.
fn truncate_to_hour(ts: DateTime<Utc>) -> DateTime<Utc> {
    ts.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(ts)
}

/// Index of the hourly bucket for `target`.
///
/// Unparseable timestamps are skipped; if none parse, index 0 is returned.
fn closest_hour_index(timestamps: &[String], target: DateTime<Utc>) -> usize {
    let target = truncate_to_hour(target);
    let mut best_index = 0;
    let mut best_diff: Option<TimeDelta> = None;

    for (i, raw) in timestamps.iter().enumerate() {
        let Some(ts) = parse_timestamp(raw) else {
            tracing::trace!("Skipping unparseable timestamp: {}", raw);
            continue;
        };

        let diff = (ts - target).abs();
        if best_diff.map_or(true, |best| diff < best) {
            best_index = i;
            best_diff = Some(diff);
        }

        if i > 0 && ts >= target {
            break;
        }
    }

    best_index
}

/// Pick the value for `target` from the live snapshot or the hourly series.
///
/// # Errors
///
/// [`SampleError::NoDataAvailable`] when neither source can serve the target,
/// [`SampleError::MisalignedSeries`] when the series lengths disagree.
pub fn select<T: Clone>(
    current: Option<&Snapshot<T>>,
    hourly: &TimeSeries<T>,
    target: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<T, SampleError> {
    if let Some(snapshot) = current {
        if (target - now).abs() < TimeDelta::minutes(LIVE_WINDOW_MINUTES) {
            return Ok(snapshot.value.clone());
        }
    }

    if hourly.is_empty() {
        return Err(SampleError::NoDataAvailable);
    }
    if !hourly.is_aligned() {
        return Err(SampleError::MisalignedSeries {
            timestamps: hourly.timestamps.len(),
            values: hourly.values.len(),
        });
    }

    let index = closest_hour_index(&hourly.timestamps, target);
    hourly
        .values
        .get(index)
        .or_else(|| hourly.values.last())
        .cloned()
        .ok_or(SampleError::NoDataAvailable)
}

/// [`select`], substituting `fallback` on any failure.
pub fn select_or<T: Clone>(
    current: Option<&Snapshot<T>>,
    hourly: &TimeSeries<T>,
    target: DateTime<Utc>,
    now: DateTime<Utc>,
    fallback: T,
) -> T {
    select(current, hourly, target, now).unwrap_or_else(|e| {
        tracing::warn!("Using fallback sample: {}", e);
        fallback
    })
}
